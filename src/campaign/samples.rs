/*!
 * Built-in sample campaigns for demos and the CLI `--sample` flag.
 */

/// A named sample of marketing copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCampaign {
    pub name: &'static str,
    pub content: &'static str,
}

pub const SAMPLE_CAMPAIGNS: [SampleCampaign; 4] = [
    SampleCampaign {
        name: "Tech Product Launch",
        content: "Revolutionize your productivity with our AI-powered assistant! Get 50% off for early adopters. Limited time offer - Transform your workflow today!",
    },
    SampleCampaign {
        name: "Health Supplement",
        content: "Boost your immunity naturally! Our vitamin complex provides 100% daily nutrients. Clinically tested formula. Order now and feel the difference!",
    },
    SampleCampaign {
        name: "Fashion Sale",
        content: "Summer collection now 70% OFF! Trendy styles that make you stand out. Free shipping worldwide. Shop now before it's gone!",
    },
    SampleCampaign {
        name: "Food Delivery",
        content: "Craving authentic cuisine? We deliver happiness to your doorstep! Order now and get your first meal free. Satisfaction guaranteed!",
    },
];

/// Find a sample by name, ignoring case and treating `-`/`_` as spaces.
pub fn find_sample(name: &str) -> Option<&'static SampleCampaign> {
    let wanted = name.trim().replace(['-', '_'], " ");
    SAMPLE_CAMPAIGNS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(&wanted))
}
