//! Eurostat datasets (EU27 + EFTA countries).
//!
//! Dimension filters pick one series out of multi-dimension tables; they are
//! applied best-effort by the Eurostat client.

use super::{Catalog, Country, Domain, Indicator, Region};
use crate::domain::Provider;

const fn ds(
    label: &'static str,
    id: &'static str,
    unit: &'static str,
    dimensions: &'static [(&'static str, &'static str)],
) -> Indicator {
    Indicator {
        label,
        id,
        unit: Some(unit),
        dimensions,
    }
}

const fn c(name: &'static str, code: &'static str) -> Country {
    Country { name, code }
}

pub static CATALOG: Catalog = Catalog {
    provider: Provider::Eurostat,
    domains: DOMAINS,
    regions: REGIONS,
    item_groups: &[],
    min_year: 1990,
    default_start_year: 2010,
};

const DOMAINS: &[Domain] = &[
    Domain {
        name: "Economy",
        code: "",
        indicators: &[
            ds("GDP at market prices", "nama_10_gdp", "Million EUR", &[("unit", "CP_MEUR"), ("na_item", "B1GQ")]),
            ds(
                "Unemployment rate",
                "une_rt_m",
                "% of active population",
                &[("s_adj", "SA"), ("age", "TOTAL"), ("sex", "T"), ("unit", "PC_ACT")],
            ),
            ds("Inflation rate (HICP)", "prc_hicp_aind", "Annual rate of change (%)", &[("unit", "RCH_A"), ("coicop", "CP00")]),
        ],
    },
    Domain {
        name: "Population",
        code: "",
        indicators: &[
            ds("Population by age group", "demo_pjangroup", "Persons", &[("sex", "T"), ("age", "TOTAL"), ("unit", "NR")]),
            ds("Life expectancy", "demo_mlexpec", "Years", &[("sex", "T"), ("age", "Y_LT1"), ("unit", "YR")]),
            ds("Births and deaths", "demo_gind", "Persons", &[("indic_de", "LBIRTH")]),
        ],
    },
    Domain {
        name: "Environment",
        code: "",
        indicators: &[
            ds(
                "Greenhouse gas emissions",
                "env_air_gge",
                "Thousand tonnes CO2 equivalent",
                &[("airpol", "GHG"), ("src_crf", "TOTX4_MEMONIA"), ("unit", "THS_T")],
            ),
            ds("Waste generation", "env_wasgen", "Tonnes", &[("waste", "TOTAL"), ("hazard", "HAZ_NHAZ"), ("nace_r2", "TOTAL_HH"), ("unit", "T")]),
            ds("Renewable energy share", "nrg_ind_ren", "%", &[("nrg_bal", "REN"), ("unit", "PC")]),
        ],
    },
    Domain {
        name: "Industry",
        code: "",
        indicators: &[
            ds(
                "Industrial production",
                "sts_inpr_m",
                "Index, 2021=100",
                &[("indic_bt", "PRD"), ("nace_r2", "B-D"), ("s_adj", "SCA"), ("unit", "I21")],
            ),
            ds(
                "Retail trade volume",
                "sts_trtu_m",
                "Index, 2021=100",
                &[("indic_bt", "VOL_SLS"), ("nace_r2", "G47"), ("s_adj", "SCA"), ("unit", "I21")],
            ),
            ds(
                "Construction production",
                "sts_copr_m",
                "Index, 2021=100",
                &[("indic_bt", "PRD"), ("nace_r2", "F"), ("s_adj", "SCA"), ("unit", "I21")],
            ),
        ],
    },
    Domain {
        name: "Social",
        code: "",
        indicators: &[
            ds("Median income", "ilc_di04", "EUR", &[("hhtyp", "TOTAL"), ("indic_il", "MED_E"), ("unit", "EUR")]),
            ds(
                "At-risk-of-poverty rate",
                "ilc_li02",
                "%",
                &[("indic_il", "LI_R_MD60"), ("sex", "T"), ("age", "TOTAL"), ("unit", "PC")],
            ),
            ds("Early leavers from education", "edat_lfse_14", "%", &[("sex", "T"), ("wstatus", "POP"), ("unit", "PC")]),
        ],
    },
];

const REGIONS: &[Region] = &[
    Region {
        name: "Western Europe",
        countries: &[
            c("Austria", "AT"),
            c("Belgium", "BE"),
            c("France", "FR"),
            c("Germany", "DE"),
            c("Luxembourg", "LU"),
            c("Netherlands", "NL"),
        ],
    },
    Region {
        name: "Northern Europe",
        countries: &[
            c("Denmark", "DK"),
            c("Finland", "FI"),
            c("Ireland", "IE"),
            c("Sweden", "SE"),
            c("Estonia", "EE"),
            c("Latvia", "LV"),
            c("Lithuania", "LT"),
        ],
    },
    Region {
        name: "Southern Europe",
        countries: &[
            c("Greece", "EL"),
            c("Italy", "IT"),
            c("Portugal", "PT"),
            c("Spain", "ES"),
            c("Croatia", "HR"),
            c("Cyprus", "CY"),
            c("Malta", "MT"),
            c("Slovenia", "SI"),
        ],
    },
    Region {
        name: "Eastern Europe",
        countries: &[
            c("Bulgaria", "BG"),
            c("Czechia", "CZ"),
            c("Hungary", "HU"),
            c("Poland", "PL"),
            c("Romania", "RO"),
            c("Slovakia", "SK"),
        ],
    },
    Region {
        name: "EFTA Countries",
        countries: &[c("Iceland", "IS"), c("Liechtenstein", "LI"), c("Norway", "NO"), c("Switzerland", "CH")],
    },
];
