//! View Selector Module
//! Maps a navigation choice to the tables and chart kinds to render.

use crate::data::{
    DataProcessor, ProcessorError, Registry, TableName, CATEGORY_COLUMN, COUNT_COLUMN, KEY_COLUMN,
    VALUE_COLUMN,
};
use polars::prelude::DataFrame;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown view: {0}")]
    UnknownView(String),
    #[error("Failed to prepare chart data: {0}")]
    Processor(#[from] ProcessorError),
}

/// The six dashboard pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewId {
    #[default]
    OffenseLinked,
    WeaponType,
    VictimRelationship,
    LocationType,
    VictimDemographics,
    OffenderDemographics,
}

impl ViewId {
    /// Menu order.
    pub const ALL: [ViewId; 6] = [
        ViewId::OffenseLinked,
        ViewId::WeaponType,
        ViewId::VictimRelationship,
        ViewId::LocationType,
        ViewId::VictimDemographics,
        ViewId::OffenderDemographics,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ViewId::OffenseLinked => "offense-linked",
            ViewId::WeaponType => "weapon-type",
            ViewId::VictimRelationship => "victim-relationship",
            ViewId::LocationType => "location-type",
            ViewId::VictimDemographics => "victim-demographics",
            ViewId::OffenderDemographics => "offender-demographics",
        }
    }

    /// Sidebar label.
    pub fn menu_label(self) -> &'static str {
        match self {
            ViewId::OffenseLinked => "Offense Linked to Another Offense",
            ViewId::WeaponType => "Type of Weapon Involved",
            ViewId::VictimRelationship => "Victim's Relationship to Offender",
            ViewId::LocationType => "Location Type",
            ViewId::VictimDemographics => "Victim Demographics",
            ViewId::OffenderDemographics => "Offender Demographics",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ViewId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .iter()
            .copied()
            .find(|v| v.id() == s)
            .ok_or_else(|| ViewError::UnknownView(s.to_string()))
    }
}

/// Chart shape of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Top-N bars ordered by count.
    RankedBar,
    /// Donut chart of each category's share.
    Proportion,
}

/// How the panels of a view are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutHint {
    /// One panel, full width.
    Single,
    /// First two panels side by side, the rest full width below.
    TwoColumnsThenFull,
}

/// Stands in for the configured top-N in panel titles.
const TOP_N_PLACEHOLDER: &str = "{n}";

struct PanelDef {
    table: TableName,
    chart: ChartKind,
    /// May contain `{n}`, filled with the top-N when the view is built
    title: &'static str,
    subheader: Option<&'static str>,
}

struct ViewDef {
    view: ViewId,
    header: &'static str,
    caption: &'static str,
    layout: LayoutHint,
    panels: &'static [PanelDef],
}

const fn ranked(table: TableName, title: &'static str) -> PanelDef {
    PanelDef {
        table,
        chart: ChartKind::RankedBar,
        title,
        subheader: None,
    }
}

const fn with_subheader(panel: PanelDef, subheader: &'static str) -> PanelDef {
    PanelDef {
        subheader: Some(subheader),
        ..panel
    }
}

const fn proportion(table: TableName, title: &'static str, subheader: &'static str) -> PanelDef {
    PanelDef {
        table,
        chart: ChartKind::Proportion,
        title,
        subheader: Some(subheader),
    }
}

/// Dispatch table: every supported view and what it renders.
static VIEW_TABLE: [ViewDef; 6] = [
    ViewDef {
        view: ViewId::OffenseLinked,
        header: "Offense Linked to Another Offense",
        caption: "Shows the most common offenses linked to another crime.",
        layout: LayoutHint::Single,
        panels: &[ranked(TableName::OffenseLinked, "Top {n} Linked Offenses")],
    },
    ViewDef {
        view: ViewId::WeaponType,
        header: "Type of Weapon Involved by Offense",
        caption: "Types of weapons most frequently involved in offenses.",
        layout: LayoutHint::Single,
        panels: &[ranked(TableName::WeaponType, "Weapon Types in Offenses")],
    },
    ViewDef {
        view: ViewId::VictimRelationship,
        header: "Victim's Relationship to Offender",
        caption: "Relationship patterns between victims and offenders.",
        layout: LayoutHint::Single,
        panels: &[ranked(
            TableName::VictimRelationship,
            "Victim-Offender Relationships",
        )],
    },
    ViewDef {
        view: ViewId::LocationType,
        header: "Location Type of Offenses",
        caption: "Where crimes are most likely to occur by location type.",
        layout: LayoutHint::Single,
        panels: &[ranked(TableName::LocationType, "Top {n} Crime Locations")],
    },
    ViewDef {
        view: ViewId::VictimDemographics,
        header: "Victim Demographics",
        caption: "Breakdown of victim demographics by race, ethnicity, and sex.",
        layout: LayoutHint::TwoColumnsThenFull,
        panels: &[
            with_subheader(
                ranked(TableName::VictimRace, "Victim Race Distribution"),
                "Victim Race",
            ),
            with_subheader(
                ranked(TableName::VictimEthnicity, "Victim Ethnicity Distribution"),
                "Victim Ethnicity",
            ),
            proportion(TableName::VictimSex, "Victim Sex Distribution", "Victim Sex"),
        ],
    },
    ViewDef {
        view: ViewId::OffenderDemographics,
        header: "Offender Demographics",
        caption: "Breakdown of offender demographics by race, ethnicity, and sex.",
        layout: LayoutHint::TwoColumnsThenFull,
        panels: &[
            with_subheader(
                ranked(TableName::OffenderRace, "Offender Race Distribution"),
                "Offender Race",
            ),
            with_subheader(
                ranked(TableName::OffenderEthnicity, "Offender Ethnicity Distribution"),
                "Offender Ethnicity",
            ),
            proportion(
                TableName::OffenderSex,
                "Offender Sex Distribution",
                "Offender Sex",
            ),
        ],
    },
];

/// One chart plus its data grid.
#[derive(Debug, Clone)]
pub struct Panel {
    pub table: TableName,
    pub chart: ChartKind,
    pub title: String,
    pub subheader: Option<&'static str>,
    /// Ranked rows for bar charts, the long table for proportion charts.
    pub data: DataFrame,
}

impl Panel {
    pub fn label_column(&self) -> &'static str {
        match self.chart {
            ChartKind::RankedBar => KEY_COLUMN,
            ChartKind::Proportion => CATEGORY_COLUMN,
        }
    }

    pub fn value_column(&self) -> &'static str {
        match self.chart {
            ChartKind::RankedBar => VALUE_COLUMN,
            ChartKind::Proportion => COUNT_COLUMN,
        }
    }
}

/// Declarative description of one dashboard page.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub view: ViewId,
    pub header: &'static str,
    pub caption: &'static str,
    pub layout: LayoutHint,
    pub panels: Vec<Panel>,
}

/// Resolve a view id string against the registry.
pub fn select_view(view_id: &str, registry: &Registry, top_n: usize) -> Result<ViewSpec, ViewError> {
    let view = view_id.parse::<ViewId>()?;
    build_view(view, registry, top_n)
}

/// Build the spec for a known view.
pub fn build_view(view: ViewId, registry: &Registry, top_n: usize) -> Result<ViewSpec, ViewError> {
    let def = VIEW_TABLE
        .iter()
        .find(|d| d.view == view)
        .ok_or_else(|| ViewError::UnknownView(view.id().to_string()))?;

    let panels = def
        .panels
        .iter()
        .map(|p| {
            let table = registry.get(p.table);
            let data = match p.chart {
                ChartKind::RankedBar => {
                    DataProcessor::top_n_by_count(table, KEY_COLUMN, VALUE_COLUMN, top_n)?
                }
                ChartKind::Proportion => DataProcessor::proportions(table),
            };
            Ok(Panel {
                table: p.table,
                chart: p.chart,
                title: p.title.replace(TOP_N_PLACEHOLDER, &top_n.to_string()),
                subheader: p.subheader,
                data,
            })
        })
        .collect::<Result<Vec<_>, ViewError>>()?;

    debug!(view = %view, panels = panels.len(), "view selected");

    Ok(ViewSpec {
        view,
        header: def.header,
        caption: def.caption,
        layout: def.layout,
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_has_exactly_one_definition() {
        for view in ViewId::ALL {
            let count = VIEW_TABLE.iter().filter(|d| d.view == view).count();
            assert_eq!(count, 1, "{view}");
        }
    }

    #[test]
    fn default_view_is_first_menu_entry() {
        assert_eq!(ViewId::default(), ViewId::OffenseLinked);
        assert_eq!(ViewId::default(), ViewId::ALL[0]);
    }

    #[test]
    fn top_n_titles_carry_the_placeholder() {
        for view in [ViewId::OffenseLinked, ViewId::LocationType] {
            let def = VIEW_TABLE.iter().find(|d| d.view == view).unwrap();
            assert!(def.panels[0].title.starts_with("Top {n} "), "{view}");
        }
        let untouched = VIEW_TABLE
            .iter()
            .flat_map(|d| d.panels)
            .filter(|p| !p.title.contains(TOP_N_PLACEHOLDER))
            .count();
        assert_eq!(untouched, 8);
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for view in ViewId::ALL {
            assert_eq!(view.id().parse::<ViewId>().unwrap(), view);
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        for bad in ["", "victim-sex", "Offense-Linked", "weapon_type"] {
            let err = bad.parse::<ViewId>().unwrap_err();
            assert!(matches!(err, ViewError::UnknownView(ref id) if id == bad));
        }
    }

    #[test]
    fn demographic_views_have_race_ethnicity_sex() {
        for (view, race, ethnicity, sex) in [
            (
                ViewId::VictimDemographics,
                TableName::VictimRace,
                TableName::VictimEthnicity,
                TableName::VictimSex,
            ),
            (
                ViewId::OffenderDemographics,
                TableName::OffenderRace,
                TableName::OffenderEthnicity,
                TableName::OffenderSex,
            ),
        ] {
            let def = VIEW_TABLE.iter().find(|d| d.view == view).unwrap();
            let shape: Vec<(TableName, ChartKind)> =
                def.panels.iter().map(|p| (p.table, p.chart)).collect();
            assert_eq!(
                shape,
                vec![
                    (race, ChartKind::RankedBar),
                    (ethnicity, ChartKind::RankedBar),
                    (sex, ChartKind::Proportion),
                ]
            );
            assert_eq!(def.layout, LayoutHint::TwoColumnsThenFull);
        }
    }

    #[test]
    fn single_table_views_render_one_ranked_bar() {
        for view in [
            ViewId::OffenseLinked,
            ViewId::WeaponType,
            ViewId::VictimRelationship,
            ViewId::LocationType,
        ] {
            let def = VIEW_TABLE.iter().find(|d| d.view == view).unwrap();
            assert_eq!(def.panels.len(), 1);
            assert_eq!(def.panels[0].chart, ChartKind::RankedBar);
            assert_eq!(def.layout, LayoutHint::Single);
        }
    }
}
