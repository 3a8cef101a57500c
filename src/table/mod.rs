pub mod normalize;
pub mod parse;

/// One record from a reference table. Field order matches the source header;
/// names and values are whatever the file claims, cleaned by `normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First non-empty value whose field name matches one of `aliases`,
    /// case-insensitively. Aliases are tried in priority order, so an earlier
    /// alias beats a later one even if both are present.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        for alias in aliases {
            for (name, value) in &self.fields {
                if name.eq_ignore_ascii_case(alias) && !value.is_empty() {
                    return Some(value.as_str());
                }
            }
        }
        None
    }
}

/// The four reference tables the assessment draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Rainfall,
    Groundwater,
    Soil,
    Aquifer,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Rainfall,
        DatasetKind::Groundwater,
        DatasetKind::Soil,
        DatasetKind::Aquifer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Rainfall => "rainfall",
            DatasetKind::Groundwater => "groundwater",
            DatasetKind::Soil => "soil",
            DatasetKind::Aquifer => "aquifer",
        }
    }

    /// File name the table is published under, relative to the data source.
    pub fn source_file(self) -> &'static str {
        match self {
            DatasetKind::Rainfall => "rainfall_by_district.csv",
            DatasetKind::Groundwater => "groundwater_depth.csv",
            DatasetKind::Soil => "soil_type.csv",
            DatasetKind::Aquifer => "aquifer_info.csv",
        }
    }
}

/// One reference table as an ordered sequence of normalized rows. The four
/// datasets are independent; they are only joined later by location string.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn empty(kind: DatasetKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    /// Parse raw tabular text into a dataset, dropping rows that are empty
    /// after normalization.
    pub fn from_text(kind: DatasetKind, text: &str) -> Self {
        let rows = parse::parse_table(text)
            .into_iter()
            .filter_map(normalize::normalize_row)
            .collect();
        Self { kind, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn lookup_is_case_insensitive_on_field_names() {
        let r = row(&[("district", "Chennai"), ("Annual_Rainfall_mm", "1400")]);
        assert_eq!(r.lookup(&["District"]), Some("Chennai"));
        assert_eq!(r.lookup(&["ANNUAL_RAINFALL_MM"]), Some("1400"));
    }

    #[test]
    fn lookup_prefers_earlier_alias() {
        let r = row(&[("Rainfall", "900"), ("Annual_Rainfall_mm", "1400")]);
        assert_eq!(r.lookup(&["Annual_Rainfall_mm", "Rainfall"]), Some("1400"));
    }

    #[test]
    fn lookup_skips_empty_values() {
        let r = row(&[("District", ""), ("City", "Madurai")]);
        assert_eq!(r.lookup(&["District", "City"]), Some("Madurai"));
        assert_eq!(r.lookup(&["District"]), None);
    }

    #[test]
    fn from_text_drops_blank_rows() {
        let csv = "District,Rainfall\nChennai,1400\n  ,  \nMadurai,850\n";
        let ds = Dataset::from_text(DatasetKind::Rainfall, csv);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].lookup(&["District"]), Some("Chennai"));
        assert_eq!(ds.rows[1].lookup(&["District"]), Some("Madurai"));
    }
}
