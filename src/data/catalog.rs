//! Table Catalog Module
//! Fixed set of logical tables, their source files and their shape.

use std::fmt;

/// Layout of a source file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Already in long format: one row per category.
    Long,
    /// One row, one column per category: needs unpivot.
    Wide,
}

/// Logical name of every table the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    OffenseLinked,
    WeaponType,
    VictimRelationship,
    LocationType,
    VictimEthnicity,
    OffenderEthnicity,
    VictimRace,
    OffenderRace,
    VictimSex,
    OffenderSex,
}

impl TableName {
    /// Every table, in load order.
    pub const ALL: [TableName; 10] = [
        TableName::OffenseLinked,
        TableName::WeaponType,
        TableName::VictimRelationship,
        TableName::LocationType,
        TableName::VictimEthnicity,
        TableName::OffenderEthnicity,
        TableName::VictimRace,
        TableName::OffenderRace,
        TableName::VictimSex,
        TableName::OffenderSex,
    ];

    /// Source file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TableName::OffenseLinked => "Offense Linked to Another Offense_09-30-2025.csv",
            TableName::WeaponType => "Type of Weapon Involved by Offense_09-30-2025.csv",
            TableName::VictimRelationship => "Victim's Relationship to Offender_09-30-2025.csv",
            TableName::LocationType => "Location Type_09-30-2025.csv",
            TableName::VictimEthnicity => "Victim ethnicity_09-30-2025.csv",
            TableName::OffenderEthnicity => "Offender ethnicity_09-30-2025.csv",
            TableName::VictimRace => "Victim race_09-30-2025.csv",
            TableName::OffenderRace => "Offender race_09-30-2025.csv",
            TableName::VictimSex => "Victim sex_09-30-2025.csv",
            TableName::OffenderSex => "Offender sex_09-30-2025.csv",
        }
    }

    pub fn shape(self) -> TableShape {
        match self {
            TableName::VictimSex | TableName::OffenderSex => TableShape::Wide,
            _ => TableShape::Long,
        }
    }

    /// Stable kebab-case identifier, used in logs and export file names.
    pub fn id(self) -> &'static str {
        match self {
            TableName::OffenseLinked => "offense-linked",
            TableName::WeaponType => "weapon-type",
            TableName::VictimRelationship => "victim-relationship",
            TableName::LocationType => "location-type",
            TableName::VictimEthnicity => "victim-ethnicity",
            TableName::OffenderEthnicity => "offender-ethnicity",
            TableName::VictimRace => "victim-race",
            TableName::OffenderRace => "offender-race",
            TableName::VictimSex => "victim-sex",
            TableName::OffenderSex => "offender-sex",
        }
    }

    /// Position in [`TableName::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn only_sex_tables_are_wide() {
        let wide: Vec<TableName> = TableName::ALL
            .iter()
            .copied()
            .filter(|t| t.shape() == TableShape::Wide)
            .collect();
        assert_eq!(wide, vec![TableName::VictimSex, TableName::OffenderSex]);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, table) in TableName::ALL.iter().enumerate() {
            assert_eq!(table.index(), i);
        }
    }

    #[test]
    fn file_names_and_ids_are_unique() {
        let files: HashSet<&str> = TableName::ALL.iter().map(|t| t.file_name()).collect();
        let ids: HashSet<&str> = TableName::ALL.iter().map(|t| t.id()).collect();
        assert_eq!(files.len(), 10);
        assert_eq!(ids.len(), 10);
    }
}
