//! Closed command sets for the main menu and its sub-menus.
//! A selection is the 1-based position of an entry in [`MenuItem::ALL`].

use std::fmt::Write as _;

pub trait MenuItem: Copy + 'static {
    const TITLE: &'static str;
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Parse a typed selection such as `"3"`.
    fn from_choice(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    fn render() -> String {
        let mut out = format!("\n{}\n", Self::TITLE);
        for (i, item) in Self::ALL.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, item.label());
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Load,
    Explore,
    Operations,
    Clean,
    Statistics,
    Visualize,
    SaveChart,
    Exit,
}

impl MenuItem for MainCommand {
    const TITLE: &'static str = "========== Data Analysis & Visualization Program ==========";
    const ALL: &'static [Self] = &[
        MainCommand::Load,
        MainCommand::Explore,
        MainCommand::Operations,
        MainCommand::Clean,
        MainCommand::Statistics,
        MainCommand::Visualize,
        MainCommand::SaveChart,
        MainCommand::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MainCommand::Load => "Load Dataset",
            MainCommand::Explore => "Explore Data",
            MainCommand::Operations => "Perform DataFrame Operations",
            MainCommand::Clean => "Handle Missing Data",
            MainCommand::Statistics => "Generate Descriptive Statistics",
            MainCommand::Visualize => "Data Visualization",
            MainCommand::SaveChart => "Save Visualization",
            MainCommand::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreCommand {
    Head,
    Tail,
    ColumnNames,
    DataTypes,
    Info,
}

impl MenuItem for ExploreCommand {
    const TITLE: &'static str = "--- Explore Data ---";
    const ALL: &'static [Self] = &[
        ExploreCommand::Head,
        ExploreCommand::Tail,
        ExploreCommand::ColumnNames,
        ExploreCommand::DataTypes,
        ExploreCommand::Info,
    ];

    fn label(self) -> &'static str {
        match self {
            ExploreCommand::Head => "First rows",
            ExploreCommand::Tail => "Last rows",
            ExploreCommand::ColumnNames => "Column names",
            ExploreCommand::DataTypes => "Data types",
            ExploreCommand::Info => "Basic info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCommand {
    Tax,
    SortDescending,
}

impl MenuItem for OperationCommand {
    const TITLE: &'static str = "--- DataFrame Operations ---";
    const ALL: &'static [Self] = &[OperationCommand::Tax, OperationCommand::SortDescending];

    fn label(self) -> &'static str {
        match self {
            OperationCommand::Tax => "Tax calculation (value column x tax rate)",
            OperationCommand::SortDescending => "Sort by column (descending)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanCommand {
    ShowMissing,
    FillMean,
    DropMissing,
}

impl MenuItem for CleanCommand {
    const TITLE: &'static str = "--- Handle Missing Data ---";
    const ALL: &'static [Self] = &[
        CleanCommand::ShowMissing,
        CleanCommand::FillMean,
        CleanCommand::DropMissing,
    ];

    fn label(self) -> &'static str {
        match self {
            CleanCommand::ShowMissing => "Display rows with missing values",
            CleanCommand::FillMean => "Fill missing values with mean (numeric only)",
            CleanCommand::DropMissing => "Drop rows with missing values",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
    Histogram,
}

impl MenuItem for ChartKind {
    const TITLE: &'static str = "--- Data Visualization ---";
    const ALL: &'static [Self] = &[
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Histogram,
    ];

    fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Plot",
            ChartKind::Line => "Line Plot",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Histogram => "Histogram",
        }
    }
}
