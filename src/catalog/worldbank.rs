//! World Bank development indicators.

use super::{Catalog, Country, Domain, Indicator, Region};
use crate::domain::Provider;

/// Substring of an indicator name → unit label. First match wins.
const UNIT_RULES: [(&str, &str); 10] = [
    ("current US$", "US$"),
    ("annual %", "%"),
    ("metric tons per capita", "tons/capita"),
    ("% of land area", "%"),
    ("% of total", "%"),
    ("per 1,000 live births", "per 1000"),
    ("per 1,000 people", "per 1000"),
    ("% of people ages 15 and above", "%"),
    ("% gross", "%"),
    ("% of GDP", "%"),
];

pub fn unit_from_indicator_name(name: &str) -> Option<&'static str> {
    UNIT_RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, unit)| *unit)
}

const fn ind(label: &'static str, id: &'static str) -> Indicator {
    Indicator {
        label,
        id,
        unit: None,
        dimensions: &[],
    }
}

const fn c(name: &'static str, code: &'static str) -> Country {
    Country { name, code }
}

pub static CATALOG: Catalog = Catalog {
    provider: Provider::WorldBank,
    domains: DOMAINS,
    regions: REGIONS,
    item_groups: &[],
    min_year: 1960,
    default_start_year: 2000,
};

const DOMAINS: &[Domain] = &[
    Domain {
        name: "Economy",
        code: "",
        indicators: &[
            ind("GDP (current US$)", "NY.GDP.MKTP.CD"),
            ind("GDP growth (annual %)", "NY.GDP.MKTP.KD.ZG"),
            ind("Inflation, consumer prices (annual %)", "FP.CPI.TOTL.ZG"),
        ],
    },
    Domain {
        name: "Population",
        code: "",
        indicators: &[
            ind("Population, total", "SP.POP.TOTL"),
            ind("Population growth (annual %)", "SP.POP.GROW"),
            ind("Life expectancy at birth", "SP.DYN.LE00.IN"),
        ],
    },
    Domain {
        name: "Environment",
        code: "",
        indicators: &[
            ind("CO2 emissions (metric tons per capita)", "EN.ATM.CO2E.PC"),
            ind("Forest area (% of land area)", "AG.LND.FRST.ZS"),
            ind("Renewable energy consumption (% of total)", "EG.FEC.RNEW.ZS"),
        ],
    },
    Domain {
        name: "Health",
        code: "",
        indicators: &[
            ind("Mortality rate, under-5 (per 1,000 live births)", "SH.DYN.MORT"),
            ind("Physicians (per 1,000 people)", "SH.MED.PHYS.ZS"),
            ind("Hospital beds (per 1,000 people)", "SH.MED.BEDS.ZS"),
        ],
    },
    Domain {
        name: "Education",
        code: "",
        indicators: &[
            ind("Literacy rate, adult total (% of people ages 15 and above)", "SE.ADT.LITR.ZS"),
            ind("School enrollment, primary (% gross)", "SE.PRM.ENRR"),
            ind("Government expenditure on education, total (% of GDP)", "SE.XPD.TOTL.GD.ZS"),
        ],
    },
];

const REGIONS: &[Region] = &[
    Region {
        name: "Americas",
        countries: &[c("United States", "USA"), c("Brazil", "BRA"), c("Canada", "CAN")],
    },
    Region {
        name: "Asia",
        countries: &[c("China", "CHN"), c("India", "IND"), c("Japan", "JPN")],
    },
    Region {
        name: "Europe",
        countries: &[c("France", "FRA"), c("Germany", "DEU"), c("United Kingdom", "GBR")],
    },
    Region {
        name: "Africa",
        countries: &[c("Nigeria", "NGA"), c("South Africa", "ZAF"), c("Egypt", "EGY")],
    },
];
