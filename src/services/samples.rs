use once_cell::sync::Lazy;
use serde::Serialize;
use crate::services::profiler::parser::parse_table;

const SALES: &str = "Date,Product,Category,Sales,Quantity,Region
2024-01-15,Laptop,Electronics,1200,2,North
2024-01-16,Mouse,Electronics,25,5,South
2024-01-17,Keyboard,Electronics,75,3,East
2024-01-18,Monitor,Electronics,300,1,West
2024-01-19,Laptop,Electronics,1200,1,North
2024-01-20,Desk,Furniture,450,2,South
2024-01-21,Chair,Furniture,200,4,East
2024-01-22,Lamp,Furniture,50,3,West
2024-01-23,Mouse,Electronics,25,10,North
2024-01-24,Keyboard,Electronics,75,5,South";

const CUSTOMERS: &str = "CustomerID,Age,Gender,Income,SpendingScore,MembershipYears
C001,25,M,45000,65,2
C002,35,F,65000,78,5
C003,28,M,52000,45,1
C004,42,F,85000,92,8
C005,31,M,48000,55,3
C006,38,F,72000,85,6
C007,29,M,55000,40,2
C008,45,F,95000,88,10
C009,33,M,58000,62,4
C010,27,F,48000,50,1";

const SAMPLES: &[(&str, &str)] = &[("sales", SALES), ("customers", CUSTOMERS)];

#[derive(Debug, Clone, Serialize)]
pub struct SampleInfo {
    pub name: &'static str,
    pub rows: usize,
    pub columns: usize,
}

static SAMPLE_INFO: Lazy<Vec<SampleInfo>> = Lazy::new(|| {
    SAMPLES
        .iter()
        .filter_map(|&(name, text)| match parse_table(text, ',') {
            Ok(table) => Some(SampleInfo {
                name,
                rows: table.row_count(),
                columns: table.column_count(),
            }),
            Err(e) => {
                tracing::error!("Built-in sample '{}' failed to parse: {}", name, e);
                None
            }
        })
        .collect()
});

pub fn get(name: &str) -> Option<&'static str> {
    SAMPLES
        .iter()
        .find(|(sample, _)| *sample == name)
        .map(|(_, text)| *text)
}

pub fn list() -> &'static [SampleInfo] {
    &SAMPLE_INFO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_and_complete() {
        let info = list();
        assert_eq!(info.len(), SAMPLES.len());
        let names: Vec<_> = info.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["sales", "customers"]);
        assert_eq!((info[0].rows, info[0].columns), (10, 6));
        assert_eq!((info[1].rows, info[1].columns), (10, 6));
    }

    #[test]
    fn every_registered_sample_parses() {
        for &(name, text) in SAMPLES {
            let table = parse_table(text, ',').unwrap();
            assert!(table.row_count() > 0, "sample {}", name);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert!(get("sales").unwrap().starts_with("Date,Product,Category"));
        assert!(get("customers").unwrap().ends_with("C010,27,F,48000,50,1"));
        assert!(get("inventory").is_none());
    }
}
