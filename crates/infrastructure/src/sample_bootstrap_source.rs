use planboard_application::BootstrapSource;
use planboard_core::{AssignmentId, MonthKey};
use planboard_domain::ResourceAssignment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLE_MEMBERS: [&str; 8] = [
    "Alice Hartmann",
    "Ben Okafor",
    "Carla Jimenez",
    "Daniel Roth",
    "Elena Vasquez",
    "Felix Brandt",
    "Grace Lindqvist",
    "Hugo Marchetti",
];

const SAMPLE_PRODUCTS: [(&str, &str); 8] = [
    ("Billing", "Invoicing"),
    ("Billing", "Payments"),
    ("Analytics", "Reporting"),
    ("Analytics", "Dashboards"),
    ("Platform", "Identity"),
    ("Platform", "Gateway"),
    ("Mobile", "iOS App"),
    ("Mobile", "Android App"),
];

const SAMPLE_TEAM: &str = "Delivery";

/// Deterministic sample dataset used when no persistence tier has records.
///
/// Hours and rates are drawn from a seeded generator so a given seed always
/// produces the same dataset, which keeps demo sessions reproducible.
#[derive(Debug, Clone, Copy)]
pub struct SampleBootstrapSource {
    seed: u64,
}

impl SampleBootstrapSource {
    /// Creates a source that always generates the same records for one seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for SampleBootstrapSource {
    fn default() -> Self {
        Self::new(2025)
    }
}

impl BootstrapSource for SampleBootstrapSource {
    fn generate(&self) -> Vec<ResourceAssignment> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        SAMPLE_MEMBERS
            .iter()
            .zip(SAMPLE_PRODUCTS.iter())
            .filter_map(|(member, (product, project))| {
                let weekly_hours: u32 = rng.gen_range(10..30);
                let hourly_rate: u32 = rng.gen_range(1000..3000);

                ResourceAssignment::monthly(
                    AssignmentId::new(),
                    *member,
                    SAMPLE_TEAM,
                    *product,
                    *project,
                    MonthKey::FALLBACK,
                    weekly_hours * 4,
                    hourly_rate,
                )
                .ok()
            })
            .collect()
    }
}
