//! Static menus of datasets and countries per provider.
//!
//! The catalog drives the interactive picker, resolves display labels, and
//! doubles as the unit metadata resolver for the normalizer.

use crate::domain::Provider;
use crate::normalize::UnitResolver;

pub mod eurostat;
pub mod faostat;
pub mod worldbank;

/// One selectable dataset/indicator.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub label: &'static str,
    pub id: &'static str,
    /// Explicit unit label; `None` means derive it (World Bank) or leave it empty.
    pub unit: Option<&'static str>,
    /// Dimension filters narrowing a multi-dimension table (Eurostat only).
    pub dimensions: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
pub struct Domain {
    pub name: &'static str,
    /// Provider-side domain code (FAOSTAT); empty when unused.
    pub code: &'static str,
    pub indicators: &'static [Indicator],
}

#[derive(Debug, Clone, Copy)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub name: &'static str,
    pub countries: &'static [Country],
}

/// A FAOSTAT item such as wheat or milk.
#[derive(Debug, Clone, Copy)]
pub struct Commodity {
    pub name: &'static str,
    pub code: &'static str,
}

/// Commodity group (FAOSTAT only).
#[derive(Debug, Clone, Copy)]
pub struct ItemGroup {
    pub name: &'static str,
    pub items: &'static [Commodity],
}

/// Everything the UI needs to know about one provider.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub provider: Provider,
    pub domains: &'static [Domain],
    pub regions: &'static [Region],
    pub item_groups: &'static [ItemGroup],
    pub min_year: i32,
    pub default_start_year: i32,
}

impl Catalog {
    pub fn for_provider(provider: Provider) -> &'static Catalog {
        match provider {
            Provider::Eurostat => &eurostat::CATALOG,
            Provider::Faostat => &faostat::CATALOG,
            Provider::WorldBank => &worldbank::CATALOG,
        }
    }

    pub fn indicator(&self, dataset_id: &str) -> Option<(&'static Domain, &'static Indicator)> {
        let domains: &'static [Domain] = self.domains;
        domains.iter().find_map(|d| {
            d.indicators
                .iter()
                .find(|i| i.id.eq_ignore_ascii_case(dataset_id))
                .map(|i| (d, i))
        })
    }

    pub fn country(&self, code: &str) -> Option<&'static Country> {
        let regions: &'static [Region] = self.regions;
        regions
            .iter()
            .flat_map(|r| r.countries.iter())
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Commodity by FAOSTAT item code; always `None` for other providers.
    pub fn commodity(&self, code: &str) -> Option<&'static Commodity> {
        let groups: &'static [ItemGroup] = self.item_groups;
        groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|i| i.code == code)
    }

    /// Human-readable dataset label, falling back to the id itself.
    pub fn dataset_label(&self, dataset_id: &str) -> String {
        match self.provider {
            Provider::Faostat => faostat::dataset_label(dataset_id),
            _ => self
                .indicator(dataset_id)
                .map(|(_, i)| i.label.to_string())
                .unwrap_or_else(|| dataset_id.to_string()),
        }
    }

    pub fn country_label(&self, code: &str) -> String {
        self.country(code)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| code.to_string())
    }

    /// Eurostat dimension filters registered for a dataset (empty if unknown).
    pub fn dimensions(&self, dataset_id: &str) -> &'static [(&'static str, &'static str)] {
        self.indicator(dataset_id).map(|(_, i)| i.dimensions).unwrap_or(&[])
    }
}

impl UnitResolver for Catalog {
    fn unit_for(&self, dataset_id: &str) -> Option<String> {
        match self.provider {
            Provider::Faostat => faostat::unit_for_dataset(dataset_id).map(str::to_string),
            Provider::WorldBank => {
                let (_, indicator) = self.indicator(dataset_id)?;
                indicator
                    .unit
                    .or_else(|| worldbank::unit_from_indicator_name(indicator.label))
                    .map(str::to_string)
            }
            Provider::Eurostat => self.indicator(dataset_id)?.1.unit.map(str::to_string),
        }
    }
}
