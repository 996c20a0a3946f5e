//! Built-in block palette.
//!
//! One module per block kind: the typed config schema, the renderer, the
//! editor descriptor, and any field-local validation live together, the
//! way each block owned its own file in the page builder this palette
//! models.

pub mod bank_partnership;
pub mod copyright;
pub mod facilities;
pub mod faq;
pub mod features;
pub mod form;
pub mod hero;
pub mod pricing;
pub mod statistics;
pub mod title_description;
pub mod video;

use crate::registry::BlockSpec;
use std::sync::Arc;

/// Specs for the full built-in palette, in palette order.
pub fn builtin_specs() -> Vec<Arc<dyn BlockSpec>> {
    vec![
        Arc::new(hero::HeroBlock),
        Arc::new(title_description::TitleDescriptionBlock),
        Arc::new(features::FeaturesBlock),
        Arc::new(facilities::FacilitiesBlock),
        Arc::new(faq::FaqBlock),
        Arc::new(pricing::PricingBlock),
        Arc::new(statistics::StatisticsBlock),
        Arc::new(video::VideoBlock),
        Arc::new(bank_partnership::BankPartnershipBlock),
        Arc::new(form::FormBlock),
        Arc::new(copyright::CopyrightBlock),
    ]
}
