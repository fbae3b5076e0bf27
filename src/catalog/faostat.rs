//! FAOSTAT domains, metrics and commodities.
//!
//! A FAOSTAT dataset id combines domain code, metric and item code:
//! `QCL:Production:15` is wheat production.

use super::{Catalog, Commodity, Country, Domain, Indicator, ItemGroup, Region};
use crate::domain::Provider;

const fn metric(label: &'static str, unit: &'static str) -> Indicator {
    Indicator {
        label,
        id: label,
        unit: Some(unit),
        dimensions: &[],
    }
}

const fn c(name: &'static str, code: &'static str) -> Country {
    Country { name, code }
}

const fn item(name: &'static str, code: &'static str) -> Commodity {
    Commodity { name, code }
}

pub static CATALOG: Catalog = Catalog {
    provider: Provider::Faostat,
    domains: DOMAINS,
    regions: REGIONS,
    item_groups: ITEM_GROUPS,
    min_year: 1961,
    default_start_year: 2000,
};

const DOMAINS: &[Domain] = &[
    Domain {
        name: "Production",
        code: "QCL",
        indicators: &[
            metric("Production", "tonnes"),
            metric("Yield", "hg/ha"),
            metric("Area Harvested", "ha"),
        ],
    },
    Domain {
        name: "Trade",
        code: "TCL",
        indicators: &[
            metric("Import Quantity", "tonnes"),
            metric("Export Quantity", "tonnes"),
            metric("Value", "1000 US$"),
        ],
    },
    Domain {
        name: "Food Security",
        code: "FS",
        indicators: &[
            metric("Food Supply", "kcal/capita/day"),
            metric("Dietary Energy Supply", "kcal/capita/day"),
        ],
    },
    Domain {
        name: "Prices",
        code: "PP",
        indicators: &[metric("Producer Price", "US$/tonne"), metric("Consumer Price", "US$/tonne")],
    },
    Domain {
        name: "Emissions",
        code: "GT",
        indicators: &[metric("Emissions", "kt CO2eq"), metric("Carbon Stock", "kt C")],
    },
];

const ITEM_GROUPS: &[ItemGroup] = &[
    ItemGroup {
        name: "Crops",
        items: &[
            item("Wheat", "15"),
            item("Rice", "27"),
            item("Maize", "56"),
            item("Soybeans", "236"),
            item("Potatoes", "116"),
            item("Tomatoes", "388"),
            item("Coffee", "656"),
            item("Tea", "667"),
        ],
    },
    ItemGroup {
        name: "Livestock",
        items: &[item("Beef", "867"), item("Poultry", "1058"), item("Milk", "882"), item("Eggs", "1062")],
    },
];

const REGIONS: &[Region] = &[
    Region {
        name: "Americas",
        countries: &[c("USA", "231"), c("Brazil", "21"), c("Canada", "39")],
    },
    Region {
        name: "Asia",
        countries: &[c("China", "351"), c("India", "100"), c("Pakistan", "165")],
    },
    Region {
        name: "Europe",
        countries: &[c("France", "68"), c("Germany", "79"), c("Russia", "185")],
    },
    Region {
        name: "Africa",
        countries: &[c("Nigeria", "159"), c("South Africa", "205")],
    },
];

/// Parsed form of a FAOSTAT dataset id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaoDataset<'a> {
    pub domain_code: &'a str,
    pub metric: &'a str,
    pub item_code: &'a str,
}

impl<'a> FaoDataset<'a> {
    pub fn parse(dataset_id: &'a str) -> Option<Self> {
        let mut parts = dataset_id.splitn(3, ':');
        let domain_code = parts.next()?.trim();
        let metric = parts.next()?.trim();
        let item_code = parts.next()?.trim();
        if domain_code.is_empty() || metric.is_empty() || item_code.is_empty() {
            return None;
        }
        Some(Self {
            domain_code,
            metric,
            item_code,
        })
    }
}

pub fn dataset_id(domain_code: &str, metric: &str, item_code: &str) -> String {
    format!("{domain_code}:{metric}:{item_code}")
}

pub fn unit_for_metric(metric: &str) -> Option<&'static str> {
    DOMAINS
        .iter()
        .flat_map(|d| d.indicators.iter())
        .find(|i| i.id.eq_ignore_ascii_case(metric))
        .and_then(|i| i.unit)
}

pub fn unit_for_dataset(dataset_id: &str) -> Option<&'static str> {
    unit_for_metric(FaoDataset::parse(dataset_id)?.metric)
}

pub fn item_name(item_code: &str) -> Option<&'static str> {
    CATALOG.commodity(item_code).map(|i| i.name)
}

/// `"Wheat Production"` for `QCL:Production:15`; the raw id when unparseable.
pub fn dataset_label(dataset_id: &str) -> String {
    match FaoDataset::parse(dataset_id) {
        Some(ds) => {
            let item = item_name(ds.item_code).unwrap_or(ds.item_code);
            format!("{item} {}", ds.metric)
        }
        None => dataset_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_id_round_trips() {
        let id = dataset_id("TCL", "Import Quantity", "27");
        assert_eq!(
            FaoDataset::parse(&id),
            Some(FaoDataset {
                domain_code: "TCL",
                metric: "Import Quantity",
                item_code: "27"
            })
        );
        assert_eq!(FaoDataset::parse("QCL:Production"), None);
        assert_eq!(FaoDataset::parse("::15"), None);
    }

    #[test]
    fn units_and_items() {
        assert_eq!(unit_for_metric("Carbon Stock"), Some("kt C"));
        assert_eq!(unit_for_metric("Unknown"), None);
        assert_eq!(item_name("1058"), Some("Poultry"));
    }
}
