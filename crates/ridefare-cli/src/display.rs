//! Text rendering for quotes, surge tiers, and the model input contract.
//!
//! Renderers return `String` so they can be tested; `print_*` wrappers write
//! to stdout.

use std::fmt::Write;

use arrow::datatypes::Schema;
use ridefare_core::{FeatureVector, PricingOutcome, RideRequest, SurgeResult};

const BAR_WIDTH: usize = 40;
const BAR: char = '█';

// ── Public API ──

/// Print a pricing card: metrics, base-vs-surge chart, and rationale.
pub fn print_quote(req: &RideRequest, outcome: &PricingOutcome) {
    print!("{}", render_quote(req, outcome));
}

pub fn print_surge(ratio: f64, surge: &SurgeResult) {
    println!("{}", render_surge(ratio, surge));
}

pub fn print_features(features: &FeatureVector) {
    print!("{}", render_features(features));
}

pub fn print_schema(schema: &Schema) {
    print!("{}", render_schema(schema));
}

// ── Rendering ──

pub fn render_quote(req: &RideRequest, outcome: &PricingOutcome) -> String {
    let mut out = String::new();
    let level = outcome.surge.level;

    let _ = writeln!(out, "=== Pricing Result ===");
    let _ = writeln!(out, "  {:<26} {}", "Base Price (₹)", rupees(outcome.base_price));
    let _ = writeln!(out, "  {:<26} {}", "Final Price (₹)", rupees(outcome.predicted_price));
    let _ = writeln!(out, "  {:<26} {}", "Surge Premium (₹)", rupees(outcome.surge_premium()));
    let _ = writeln!(out, "  {:<26} {} {}", "Surge Level", level.indicator(), level.label());
    let _ = writeln!(out, "  {:<26} ×{:.1}", "Surge Multiplier", outcome.surge.multiplier);
    let _ = writeln!(out);

    let _ = writeln!(out, "Base vs Surge Price Comparison");
    let max = outcome.base_price.max(outcome.predicted_price);
    for (name, value) in [
        ("Base Price", outcome.base_price),
        ("Surge Price", outcome.predicted_price),
    ] {
        let bar = BAR.to_string().repeat(bar_len(value, max));
        let _ = writeln!(out, "  {:<12} {:<w$} {}", name, bar, rupees(value), w = BAR_WIDTH);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Why this price?");
    let _ = writeln!(out, "  - Demand/Supply Ratio: {:.2}", outcome.demand_supply_ratio);
    let _ = writeln!(out, "  - Time of Booking: {}", req.time_of_booking);
    let _ = writeln!(out, "  - Vehicle Type: {}", req.vehicle);
    let _ = writeln!(out, "  - Location: {}", req.location);
    out
}

pub fn render_surge(ratio: f64, surge: &SurgeResult) -> String {
    format!(
        "ratio {:.2} → {} {} (×{:.1})",
        ratio,
        surge.level.indicator(),
        surge.level.label(),
        surge.multiplier
    )
}

pub fn render_features(features: &FeatureVector) -> String {
    let mut out = String::new();
    for (name, value) in features.named() {
        let _ = writeln!(out, "  {:<26} {}", name, value);
    }
    out
}

pub fn render_schema(schema: &Schema) -> String {
    let mut out = String::new();
    for (i, field) in schema.fields().iter().enumerate() {
        let _ = writeln!(out, "  {:>2}  {:<26} {}", i, field.name(), field.data_type());
    }
    out
}

// ── Helpers ──

fn rupees(value: f64) -> String {
    format!("₹{value:.2}")
}

/// Bar length for `value` scaled so that `max` fills [`BAR_WIDTH`].
fn bar_len(value: f64, max: f64) -> usize {
    if !max.is_finite() || max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round().min(BAR_WIDTH as f64) as usize
}
