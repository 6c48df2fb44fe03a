use serde::{Deserialize, Serialize};

/// Which of the two input templates to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// IT system extract
    It,
    /// Master (reference) data
    Master,
}

impl TemplateKind {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "it" => Some(Self::It),
            "master" => Some(Self::Master),
            _ => None,
        }
    }

    /// Template CSV: header plus one sample row
    #[must_use]
    pub fn content(self) -> &'static str {
        match self {
            Self::It => concat!(
                "ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU\n",
                "MES10612,AMI10000,MES10612AMI10000,REG23,59000,3,5\n"
            ),
            Self::Master => concat!(
                "ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG\n",
                "DJJ10000,AMI10000,DJJ10000AMI10000,REG23,107000,4,5\n"
            ),
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::It => "Template_Data_IT.csv",
            Self::Master => "Template_Master_Data.csv",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::It => write!(f, "IT"),
            Self::Master => write!(f, "master"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::ComparisonField;
    use crate::parsing::table::parse_table_text;

    #[test]
    fn test_templates_carry_compared_columns() {
        let it = parse_table_text(TemplateKind::It.content(), ',');
        let master = parse_table_text(TemplateKind::Master.content(), ',');
        assert_eq!(it.len(), 1);
        assert_eq!(master.len(), 1);

        for field in ComparisonField::ALL {
            assert!(it[0].columns().any(|c| c == field.it_column()));
            assert!(master[0].columns().any(|c| c == field.master_column()));
        }
    }

    #[test]
    fn test_template_names() {
        assert_eq!(TemplateKind::from_name("IT"), Some(TemplateKind::It));
        assert_eq!(TemplateKind::Master.file_name(), "Template_Master_Data.csv");
        assert_eq!(TemplateKind::from_name("other"), None);
    }
}
