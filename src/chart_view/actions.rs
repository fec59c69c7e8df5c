use tracing::warn;

use crate::data_types::ViewState;
use crate::view_controller::Command;

use super::TrellisHistogram2DView;

/// Dialogs whose answer comes back as a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    /// Asks for a primary bucket count, answered with `Command::ChooseBuckets`.
    BucketCount,
    /// Asks for a group count, answered with `Command::ChangeGroups`.
    GroupCount,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuAction {
    Command(Command),
    Dialog(DialogKind),
    ExportCsv,
    /// Combine the current dataset with the one selected in the page chrome,
    /// using the operation picked there.
    Combine,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub text: String,
    pub help: String,
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuItem {
    fn new(text: &str, help: &str, action: MenuAction) -> Self {
        Self {
            text: text.to_string(),
            help: help.to_string(),
            action,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubMenu {
    pub text: String,
    pub items: Vec<MenuItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopMenu {
    pub menus: Vec<SubMenu>,
}

impl TopMenu {
    pub fn find(&self, menu: &str, item: &str) -> Option<&MenuItem> {
        self.menus
            .iter()
            .find(|m| m.text == menu)?
            .items
            .iter()
            .find(|i| i.text == item)
    }
}

pub fn build_menu(state: &ViewState) -> TopMenu {
    let normalization = if state.relative {
        "absolute"
    } else {
        "relative"
    };
    let view = vec![
        MenuItem::new(
            "refresh",
            "Redraw this view.",
            MenuAction::Command(Command::Refresh),
        ),
        MenuItem::new(
            "table",
            "Show the data underlying view using a table view.",
            MenuAction::Command(Command::Table),
        ),
        MenuItem::new(
            "exact",
            "Draw this data without making any approximations.",
            MenuAction::Command(Command::Exact),
        ),
        MenuItem::new(
            "# buckets...",
            "Change the number of buckets used to draw the histograms.",
            MenuAction::Dialog(DialogKind::BucketCount),
        ),
        MenuItem::new(
            "swap axes",
            "Swap the X and Y axes of all plots.",
            MenuAction::Command(Command::SwapAxes),
        ),
        MenuItem::new(
            "heatmap",
            "Show this data as a Trellis plot of heatmaps.",
            MenuAction::Command(Command::Heatmap),
        ),
        MenuItem::new(
            "# groups...",
            "Change the number of groups.",
            MenuAction::Dialog(DialogKind::GroupCount),
        ),
        MenuItem::new(
            normalization,
            "Toggle between showing absolute and relative counts.",
            MenuAction::Command(Command::ToggleNormalization),
        ),
    ];
    let mut export = MenuItem::new(
        "As CSV",
        "Export the data in this view as a CSV file.",
        MenuAction::ExportCsv,
    );
    export.enabled = false;

    TopMenu {
        menus: vec![
            SubMenu {
                text: "Export".to_string(),
                items: vec![export],
            },
            SubMenu {
                text: "View".to_string(),
                items: view,
            },
            SubMenu {
                text: "Combine".to_string(),
                items: vec![MenuItem::new(
                    "Combine...",
                    "Combine the data in this view with another selected dataset.",
                    MenuAction::Combine,
                )],
            },
        ],
    }
}

impl TrellisHistogram2DView {
    /// Runs a menu action. Returns the dialog the page must show, if any.
    pub fn on_menu(&mut self, action: MenuAction) -> Option<DialogKind> {
        match action {
            MenuAction::Command(command) => {
                self.execute(command);
                None
            }
            MenuAction::Dialog(kind) => Some(kind),
            MenuAction::ExportCsv => {
                self.page.report_error("Not yet implemented");
                None
            }
            MenuAction::Combine => {
                match self.page.combine_selection() {
                    Some(selection) => {
                        self.combine_with(selection.operator.as_ref(), &selection.other)
                    }
                    None => {
                        warn!("combine without a selected dataset");
                        self.page.report_error("Select a dataset to combine with first");
                    }
                }
                None
            }
        }
    }
}
