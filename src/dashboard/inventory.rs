use crate::aggregate::{self, Bucket};
use crate::classify::{self, Classification, MaterialStatus, StockStatus};
use crate::config::AnalyticsConfig;
use crate::filter::Filters;
use crate::kpi::{self, Kpi, Unit};
use crate::models::{FinishedGood, Ingredient, RawMaterial};
use crate::normalize::lenient::UNKNOWN;
use crate::rank::{self, RankedEntry};
use ahash::AHashMap;
use serde::Serialize;

/// Per-product cost breakdown from the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCosting {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_band: String,
    pub unit_material_cost: f64,
    /// Margin on one unit, in percent of price.
    pub unit_margin: f64,
}

/// Finished goods, their stock health, and the raw materials behind them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub product_count: Kpi,
    pub units_in_stock: Kpi,
    pub inventory_value: Kpi,
    pub gross_margin: Kpi,
    pub low_stock_count: Kpi,
    pub materials_to_reorder: Kpi,
    pub stock_status: Vec<Classification<FinishedGood, StockStatus>>,
    pub costing: Vec<ProductCosting>,
    pub stock_status_distribution: Vec<Bucket>,
    pub category_distribution: Vec<Bucket>,
    pub price_range_distribution: Vec<Bucket>,
    pub top_products_by_value: Vec<RankedEntry<FinishedGood>>,
    pub low_stock_items: Vec<RankedEntry<FinishedGood>>,
    pub materials: Vec<Classification<RawMaterial, MaterialStatus>>,
    pub material_usage: Vec<RankedEntry<Bucket>>,
}

/// Unit cost lookup keyed by raw material id.
struct CostBook<'a> {
    unit_cost: AHashMap<&'a str, f64>,
}

impl<'a> CostBook<'a> {
    fn new(materials: &'a [RawMaterial]) -> Self {
        let unit_cost = materials
            .iter()
            .filter(|m| !m.id.is_empty())
            .map(|m| (m.id.as_str(), kpi::finite(m.unit_cost)))
            .collect();
        Self { unit_cost }
    }

    /// Material cost of one unit. Ingredients naming an unknown material cost nothing.
    fn unit_cost_of(&self, good: &FinishedGood) -> f64 {
        good.raw_ingredients
            .iter()
            .map(|i| {
                let cost = self.unit_cost.get(i.raw_id.as_str()).copied().unwrap_or(0.0);
                kpi::finite(i.quantity_consumed) * cost
            })
            .sum()
    }
}

fn ingredient_label(i: &Ingredient) -> String {
    if !i.name.is_empty() {
        i.name.clone()
    } else if !i.raw_id.is_empty() {
        i.raw_id.clone()
    } else {
        UNKNOWN.to_string()
    }
}

impl InventoryView {
    pub fn build(
        goods: &[FinishedGood],
        materials: &[RawMaterial],
        filters: &Filters,
        cfg: &AnalyticsConfig,
    ) -> Self {
        let goods = filters.scoped_to::<FinishedGood>().apply(goods);
        let materials = filters.scoped_to::<RawMaterial>().apply(materials);
        let classifier = &cfg.classifier;
        let bands = classify::price_bands(classifier);
        let book = CostBook::new(&materials);

        let units = |g: &FinishedGood| g.units_on_hand() as f64;
        let value = |g: &FinishedGood| kpi::finite(g.price) * units(g);

        let revenue = kpi::total(&goods, value);
        let cost = kpi::total(&goods, |g| book.unit_cost_of(g) * units(g));

        let stock_status = classify::classify(&goods, |g| classify::stock_status(g.stock, classifier));
        let low_stock: Vec<FinishedGood> = stock_status
            .iter()
            .filter(|c| c.status != StockStatus::InStock)
            .map(|c| c.record.clone())
            .collect();

        let costing = goods
            .iter()
            .map(|g| {
                let unit_cost = book.unit_cost_of(g);
                ProductCosting {
                    id: g.id.clone(),
                    name: g.name.clone(),
                    price: g.price,
                    price_band: classify::price_band(g.price, &bands).to_string(),
                    unit_material_cost: unit_cost,
                    unit_margin: kpi::margin(g.price, unit_cost),
                }
            })
            .collect();

        let status_order: Vec<&str> = StockStatus::ALL.iter().map(|s| s.as_str()).collect();
        let stock_status_distribution = aggregate::sort_by_order(
            aggregate::count_by(&stock_status, |c| c.status.to_string()),
            &status_order,
        );
        let band_order: Vec<&str> = bands.iter().map(|b| b.label.as_str()).collect();
        let price_range_distribution = aggregate::sort_by_order(
            aggregate::count_by(&goods, |g| classify::price_band(g.price, &bands).to_string()),
            &band_order,
        );

        let material_status = classify::classify(&materials, |m| {
            classify::material_status(m.available_quantity, m.minimum_stock)
        });
        let to_reorder = material_status
            .iter()
            .filter(|c| c.status != MaterialStatus::Sufficient)
            .count();

        let ingredients: Vec<&Ingredient> = goods.iter().flat_map(|g| g.raw_ingredients.iter()).collect();
        let usage = aggregate::bucketize(&ingredients, |i| ingredient_label(i), |i| i.quantity_consumed);

        let threshold = classifier.low_stock_threshold as f64;
        let top_n = cfg.ranking.top_n;

        InventoryView {
            product_count: Kpi::count("Products", goods.len()),
            units_in_stock: Kpi::new("Units in Stock", kpi::total(&goods, units), Unit::Count),
            inventory_value: Kpi::new("Inventory Value", revenue, Unit::Currency),
            gross_margin: Kpi::new("Gross Margin", kpi::margin(revenue, cost), Unit::Percent),
            low_stock_count: Kpi::count("Low or Out of Stock", low_stock.len()),
            materials_to_reorder: Kpi::count("Materials to Reorder", to_reorder),
            costing,
            stock_status_distribution,
            category_distribution: aggregate::count_by(&goods, |g| g.category.clone()),
            price_range_distribution,
            top_products_by_value: rank::top_n(&goods, value, top_n),
            low_stock_items: rank::top_n(&low_stock, |g| threshold - g.stock as f64, top_n),
            stock_status,
            materials: material_status,
            material_usage: rank::top_n(&usage, |b| b.value, top_n),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![
            &self.product_count,
            &self.units_in_stock,
            &self.inventory_value,
            &self.gross_margin,
            &self.low_stock_count,
            &self.materials_to_reorder,
        ]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![
            ("stock_status", self.stock_status_distribution.as_slice()),
            ("categories", self.category_distribution.as_slice()),
            ("price_ranges", self.price_range_distribution.as_slice()),
        ]
    }
}
