use serde::Serialize;

/// A named bucket of teams rendered together: one of the two conferences or
/// one of the six divisions.
///
/// The derived ordering (conferences first, then divisions east to west) is
/// the order groups are laid out on the page and serialized in the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Group {
    #[serde(rename = "eastern-conference")]
    Eastern,
    #[serde(rename = "western-conference")]
    Western,
    #[serde(rename = "atlantic-division")]
    Atlantic,
    #[serde(rename = "central-division")]
    Central,
    #[serde(rename = "southeast-division")]
    Southeast,
    #[serde(rename = "northwest-division")]
    Northwest,
    #[serde(rename = "pacific-division")]
    Pacific,
    #[serde(rename = "southwest-division")]
    Southwest,
}

impl Group {
    pub const CONFERENCES: [Group; 2] = [Group::Eastern, Group::Western];

    pub const DIVISIONS: [Group; 6] = [
        Group::Atlantic,
        Group::Central,
        Group::Southeast,
        Group::Northwest,
        Group::Pacific,
        Group::Southwest,
    ];

    /// Identifier of the host-page container this group renders into.
    pub fn container_id(self) -> &'static str {
        match self {
            Group::Eastern => "eastern-conference",
            Group::Western => "western-conference",
            Group::Atlantic => "atlantic-division",
            Group::Central => "central-division",
            Group::Southeast => "southeast-division",
            Group::Northwest => "northwest-division",
            Group::Pacific => "pacific-division",
            Group::Southwest => "southwest-division",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Group::Eastern => "Eastern Conference",
            Group::Western => "Western Conference",
            Group::Atlantic => "Atlantic Division",
            Group::Central => "Central Division",
            Group::Southeast => "Southeast Division",
            Group::Northwest => "Northwest Division",
            Group::Pacific => "Pacific Division",
            Group::Southwest => "Southwest Division",
        }
    }

    /// Conference a group belongs to (a conference belongs to itself).
    pub fn conference(self) -> Group {
        match self {
            Group::Eastern | Group::Atlantic | Group::Central | Group::Southeast => Group::Eastern,
            Group::Western | Group::Northwest | Group::Pacific | Group::Southwest => Group::Western,
        }
    }

    /// Match a `division` tag from a predictions file.
    ///
    /// Case and surrounding whitespace are ignored, and a trailing "Division"
    /// is accepted ("Atlantic", "atlantic", "Atlantic Division").
    pub fn from_division(tag: &str) -> Option<Group> {
        let lower = tag.trim().to_lowercase();
        let name = lower
            .strip_suffix("division")
            .map(str::trim_end)
            .unwrap_or(lower.as_str());
        match name {
            "atlantic" => Some(Group::Atlantic),
            "central" => Some(Group::Central),
            "southeast" => Some(Group::Southeast),
            "northwest" => Some(Group::Northwest),
            "pacific" => Some(Group::Pacific),
            "southwest" => Some(Group::Southwest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_division_variants() {
        assert_eq!(Group::from_division("Atlantic"), Some(Group::Atlantic));
        assert_eq!(Group::from_division("  pacific "), Some(Group::Pacific));
        assert_eq!(Group::from_division("Southwest Division"), Some(Group::Southwest));
        assert_eq!(Group::from_division("Midwest"), None);
        assert_eq!(Group::from_division(""), None);
    }

    #[test]
    fn test_divisions_map_to_conferences() {
        let east = Group::DIVISIONS
            .iter()
            .filter(|g| g.conference() == Group::Eastern)
            .count();
        assert_eq!(east, 3);
        assert_eq!(Group::Western.conference(), Group::Western);
    }

    #[test]
    fn test_serializes_as_container_id() {
        for group in Group::CONFERENCES.iter().chain(Group::DIVISIONS.iter()) {
            let json = serde_json::to_string(group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.container_id()));
        }
    }
}
