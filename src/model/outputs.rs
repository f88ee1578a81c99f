//! Cost breakdown and model outputs.

use serde::{Deserialize, Serialize};

/// The eight cost categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostCategory {
    /// Treatment of attributable diarrhoeal cases.
    HealthCare,
    /// Work days lost to illness.
    Productivity,
    /// Premature deaths.
    Mortality,
    /// Lifetime earnings lost to stunting.
    Nutrition,
    /// Time spent reaching open-defecation sites.
    AccessTime,
    /// Emissions valued at the social cost of carbon.
    Carbon,
    /// Cholera response plus funerals.
    CholeraAndFunerals,
    /// Reputational tourism losses.
    Tourism,
}

impl CostCategory {
    /// All categories in summation order.
    pub const ALL: [Self; 8] = [
        Self::HealthCare,
        Self::Productivity,
        Self::Mortality,
        Self::Nutrition,
        Self::AccessTime,
        Self::Carbon,
        Self::CholeraAndFunerals,
        Self::Tourism,
    ];

    /// Wire name, matching the field names of [`CostBreakdown`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealthCare => "healthCare",
            Self::Productivity => "productivity",
            Self::Mortality => "mortality",
            Self::Nutrition => "nutrition",
            Self::AccessTime => "accessTime",
            Self::Carbon => "carbon",
            Self::CholeraAndFunerals => "choleraAndFunerals",
            Self::Tourism => "tourism",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HealthCare => "Health care",
            Self::Productivity => "Productivity",
            Self::Mortality => "Premature mortality",
            Self::Nutrition => "Stunting",
            Self::AccessTime => "Access time",
            Self::Carbon => "Carbon",
            Self::CholeraAndFunerals => "Cholera & funerals",
            Self::Tourism => "Tourism",
        }
    }
}

/// Eight independently computed monetary components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Health care.
    pub health_care: f64,
    /// Productivity.
    pub productivity: f64,
    /// Mortality.
    pub mortality: f64,
    /// Nutrition (stunting).
    pub nutrition: f64,
    /// Access time.
    pub access_time: f64,
    /// Carbon.
    pub carbon: f64,
    /// Cholera and funerals.
    pub cholera_and_funerals: f64,
    /// Tourism.
    pub tourism: f64,
}

impl CostBreakdown {
    /// Value of one category.
    #[must_use]
    pub const fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::HealthCare => self.health_care,
            CostCategory::Productivity => self.productivity,
            CostCategory::Mortality => self.mortality,
            CostCategory::Nutrition => self.nutrition,
            CostCategory::AccessTime => self.access_time,
            CostCategory::Carbon => self.carbon,
            CostCategory::CholeraAndFunerals => self.cholera_and_funerals,
            CostCategory::Tourism => self.tourism,
        }
    }

    /// `(category, value)` pairs in summation order.
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, f64)> + '_ {
        CostCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all eight components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.health_care
            + self.productivity
            + self.mortality
            + self.nutrition
            + self.access_time
            + self.carbon
            + self.cholera_and_funerals
            + self.tourism
    }

    /// Every component multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Add another breakdown component-wise.
    pub fn accumulate(&mut self, other: &Self) {
        self.health_care += other.health_care;
        self.productivity += other.productivity;
        self.mortality += other.mortality;
        self.nutrition += other.nutrition;
        self.access_time += other.access_time;
        self.carbon += other.carbon;
        self.cholera_and_funerals += other.cholera_and_funerals;
        self.tourism += other.tourism;
    }

    /// Largest component.
    #[must_use]
    pub fn dominant(&self) -> CostCategory {
        self.iter()
            .fold((CostCategory::HealthCare, f64::NEG_INFINITY), |best, (c, v)| {
                if v > best.1 {
                    (c, v)
                } else {
                    best
                }
            })
            .0
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            health_care: f(self.health_care),
            productivity: f(self.productivity),
            mortality: f(self.mortality),
            nutrition: f(self.nutrition),
            access_time: f(self.access_time),
            carbon: f(self.carbon),
            cholera_and_funerals: f(self.cholera_and_funerals),
            tourism: f(self.tourism),
        }
    }
}

/// Result of one deterministic evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutputs {
    /// Breakdown in USD.
    #[serde(rename = "costsUSD")]
    pub costs_usd: CostBreakdown,
    /// Breakdown in local currency.
    pub costs_local: CostBreakdown,
    /// Total in USD.
    #[serde(rename = "totalCostUSD")]
    pub total_cost_usd: f64,
    /// Total in local currency.
    pub total_cost_local: f64,
    /// Total as a percentage of national GDP.
    #[serde(rename = "percentGDP")]
    pub percent_gdp: f64,
    /// Currency of the local figures.
    pub currency_code: String,
}
