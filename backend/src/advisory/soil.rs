use lazy_static::lazy_static;
use shared::{FertilizerRecommendation, NutrientLevel, NutrientLevels, SoilData};
use std::collections::HashMap;

/// Field names the analyze endpoint requires, in wire (camelCase) form.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "nitrogen",
    "phosphorus",
    "potassium",
    "ph",
    "moisture",
    "organicMatter",
];

struct NutrientRange {
    low: f32,
    high: f32,
}

impl NutrientRange {
    const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    fn classify(&self, value: f32) -> NutrientLevel {
        if value < self.low {
            NutrientLevel::Low
        } else if value > self.high {
            NutrientLevel::High
        } else {
            NutrientLevel::Optimal
        }
    }
}

// Agronomic ranges: N/P/K in kg/ha, moisture and organic matter in percent.
const NITROGEN_RANGE: NutrientRange = NutrientRange::new(40.0, 80.0);
const PHOSPHORUS_RANGE: NutrientRange = NutrientRange::new(20.0, 50.0);
const POTASSIUM_RANGE: NutrientRange = NutrientRange::new(100.0, 200.0);
const PH_RANGE: NutrientRange = NutrientRange::new(6.0, 7.5);
const MOISTURE_RANGE: NutrientRange = NutrientRange::new(30.0, 60.0);
const ORGANIC_MATTER_RANGE: NutrientRange = NutrientRange::new(2.0, 6.0);

pub struct SoilAnalysis {
    pub levels: NutrientLevels,
    pub health: String,
    pub score: u32,
}

pub fn analyze(data: &SoilData) -> SoilAnalysis {
    let levels = NutrientLevels {
        nitrogen: NITROGEN_RANGE.classify(data.nitrogen),
        phosphorus: PHOSPHORUS_RANGE.classify(data.phosphorus),
        potassium: POTASSIUM_RANGE.classify(data.potassium),
        ph: PH_RANGE.classify(data.ph),
        moisture: MOISTURE_RANGE.classify(data.moisture),
        organic_matter: ORGANIC_MATTER_RANGE.classify(data.organic_matter),
    };

    let optimal = [
        levels.nitrogen,
        levels.phosphorus,
        levels.potassium,
        levels.ph,
        levels.moisture,
        levels.organic_matter,
    ]
    .iter()
    .filter(|l| **l == NutrientLevel::Optimal)
    .count() as u32;

    let score = optimal * 100 / 6;
    let health = match score {
        83.. => "Excellent",
        66.. => "Good",
        33.. => "Fair",
        _ => "Poor",
    }
    .to_string();

    SoilAnalysis {
        levels,
        health,
        score,
    }
}

fn recommendation(
    kind: &str,
    quantity: f32,
    unit: &str,
    timing: &str,
    cost: f32,
    organic: bool,
) -> FertilizerRecommendation {
    FertilizerRecommendation {
        kind: kind.to_string(),
        quantity,
        unit: unit.to_string(),
        timing: timing.to_string(),
        cost,
        organic,
    }
}

/// One recommendation per deficient nutrient, plus pH correction. Costs are
/// indicative per-acre figures in rupees.
pub fn recommend_fertilizers(
    data: &SoilData,
    levels: &NutrientLevels,
) -> (Vec<FertilizerRecommendation>, Vec<String>) {
    let mut fertilizers = Vec::new();
    let mut advice = Vec::new();

    if levels.nitrogen == NutrientLevel::Low {
        fertilizers.push(recommendation(
            "Urea", 50.0, "kg/acre", "Split: half at sowing, half at tillering", 300.0, false,
        ));
        fertilizers.push(recommendation(
            "Compost", 500.0, "kg/acre", "Two weeks before sowing", 250.0, true,
        ));
        advice.push("Nitrogen is low; leaf yellowing is likely without correction.".to_string());
    }
    if levels.phosphorus == NutrientLevel::Low {
        fertilizers.push(recommendation(
            "DAP", 40.0, "kg/acre", "At sowing, placed below seed", 540.0, false,
        ));
        advice.push("Phosphorus is low; root development will suffer.".to_string());
    }
    if levels.potassium == NutrientLevel::Low {
        fertilizers.push(recommendation(
            "Muriate of Potash", 30.0, "kg/acre", "At sowing", 510.0, false,
        ));
        advice.push("Potassium is low; expect weak stems and poor grain filling.".to_string());
    }
    if levels.ph == NutrientLevel::Low {
        fertilizers.push(recommendation(
            "Agricultural Lime", 200.0, "kg/acre", "One month before sowing", 400.0, true,
        ));
        advice.push("Soil is acidic; lime raises pH and unlocks bound nutrients.".to_string());
    } else if levels.ph == NutrientLevel::High {
        fertilizers.push(recommendation(
            "Gypsum", 150.0, "kg/acre", "Before irrigation", 350.0, true,
        ));
        advice.push("Soil is alkaline; gypsum lowers pH gradually.".to_string());
    }
    if levels.organic_matter == NutrientLevel::Low {
        fertilizers.push(recommendation(
            "Farmyard Manure", 2000.0, "kg/acre", "Three weeks before sowing", 600.0, true,
        ));
        advice.push("Organic matter is low; manure improves structure and water holding.".to_string());
    }
    if levels.moisture == NutrientLevel::Low {
        advice.push("Soil moisture is low; irrigate before applying any fertilizer.".to_string());
    } else if levels.moisture == NutrientLevel::High {
        advice.push("Soil is waterlogged; drain before applying fertilizer to avoid runoff.".to_string());
    }

    if fertilizers.is_empty() {
        advice.push(format!(
            "Soil is in good balance (pH {:.1}); maintain the current practice.",
            data.ph
        ));
    }

    (fertilizers, advice)
}

struct CropNeeds {
    nitrogen: f32,
    phosphorus: f32,
    potassium: f32,
}

lazy_static! {
    static ref CROP_NEEDS: HashMap<&'static str, CropNeeds> = {
        let mut table = HashMap::new();
        table.insert("wheat", CropNeeds { nitrogen: 60.0, phosphorus: 30.0, potassium: 120.0 });
        table.insert("rice", CropNeeds { nitrogen: 80.0, phosphorus: 40.0, potassium: 140.0 });
        table.insert("maize", CropNeeds { nitrogen: 75.0, phosphorus: 35.0, potassium: 130.0 });
        table.insert("tomato", CropNeeds { nitrogen: 70.0, phosphorus: 45.0, potassium: 180.0 });
        table.insert("potato", CropNeeds { nitrogen: 65.0, phosphorus: 40.0, potassium: 200.0 });
        table
    };
}

const DEFAULT_NEEDS: CropNeeds = CropNeeds {
    nitrogen: 60.0,
    phosphorus: 35.0,
    potassium: 140.0,
};

/// Crop-specific plan: tops up each nutrient to the crop's requirement.
pub fn crop_fertilizer_plan(crop_type: &str, data: &SoilData) -> Vec<FertilizerRecommendation> {
    let needs = CROP_NEEDS
        .get(crop_type.to_lowercase().as_str())
        .unwrap_or(&DEFAULT_NEEDS);

    let mut plan = Vec::new();
    let nitrogen_gap = needs.nitrogen - data.nitrogen;
    if nitrogen_gap > 0.0 {
        // Urea is 46% N.
        plan.push(recommendation(
            "Urea",
            (nitrogen_gap / 0.46).round(),
            "kg/acre",
            "Split across sowing and tillering",
            (nitrogen_gap / 0.46 * 6.0).round(),
            false,
        ));
    }
    let phosphorus_gap = needs.phosphorus - data.phosphorus;
    if phosphorus_gap > 0.0 {
        plan.push(recommendation(
            "Single Super Phosphate",
            (phosphorus_gap / 0.16).round(),
            "kg/acre",
            "At sowing",
            (phosphorus_gap / 0.16 * 8.0).round(),
            false,
        ));
    }
    let potassium_gap = needs.potassium - data.potassium;
    if potassium_gap > 0.0 {
        plan.push(recommendation(
            "Muriate of Potash",
            (potassium_gap / 0.60).round(),
            "kg/acre",
            "At sowing",
            (potassium_gap / 0.60 * 17.0).round(),
            false,
        ));
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_soil() -> SoilData {
        SoilData {
            nitrogen: 60.0,
            phosphorus: 35.0,
            potassium: 150.0,
            ph: 6.8,
            moisture: 45.0,
            organic_matter: 3.5,
        }
    }

    #[test]
    fn balanced_soil_scores_excellent_with_no_fertilizers() {
        let data = balanced_soil();
        let analysis = analyze(&data);
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.health, "Excellent");

        let (fertilizers, advice) = recommend_fertilizers(&data, &analysis.levels);
        assert!(fertilizers.is_empty());
        assert!(!advice.is_empty());
    }

    #[test]
    fn low_nitrogen_is_classified_and_gets_urea() {
        let mut data = balanced_soil();
        data.nitrogen = 10.0;
        let analysis = analyze(&data);
        assert_eq!(analysis.levels.nitrogen, NutrientLevel::Low);

        let (fertilizers, _) = recommend_fertilizers(&data, &analysis.levels);
        assert!(fertilizers.iter().any(|f| f.kind == "Urea"));
        assert!(fertilizers.iter().any(|f| f.organic));
    }

    #[test]
    fn acidic_soil_gets_lime_and_alkaline_gets_gypsum() {
        let mut acidic = balanced_soil();
        acidic.ph = 5.2;
        let (fertilizers, _) = recommend_fertilizers(&acidic, &analyze(&acidic).levels);
        assert!(fertilizers.iter().any(|f| f.kind == "Agricultural Lime"));

        let mut alkaline = balanced_soil();
        alkaline.ph = 8.4;
        let (fertilizers, _) = recommend_fertilizers(&alkaline, &analyze(&alkaline).levels);
        assert!(fertilizers.iter().any(|f| f.kind == "Gypsum"));
    }

    #[test]
    fn depleted_soil_scores_poor() {
        let data = SoilData {
            nitrogen: 5.0,
            phosphorus: 4.0,
            potassium: 30.0,
            ph: 4.8,
            moisture: 10.0,
            organic_matter: 0.5,
        };
        let analysis = analyze(&data);
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.health, "Poor");
    }

    #[test]
    fn crop_plan_tops_up_to_crop_requirement() {
        let mut data = balanced_soil();
        data.potassium = 100.0;
        // Potato wants 200 kg/ha of potassium.
        let plan = crop_fertilizer_plan("potato", &data);
        assert!(plan.iter().any(|f| f.kind == "Muriate of Potash"));

        // Wheat is satisfied by the same soil.
        let wheat_plan = crop_fertilizer_plan("wheat", &data);
        assert!(!wheat_plan.iter().any(|f| f.kind == "Muriate of Potash"));
    }

    #[test]
    fn unknown_crop_uses_default_needs() {
        let data = SoilData {
            nitrogen: 0.0,
            phosphorus: 0.0,
            potassium: 0.0,
            ph: 6.8,
            moisture: 45.0,
            organic_matter: 3.5,
        };
        let plan = crop_fertilizer_plan("dragonfruit", &data);
        assert_eq!(plan.len(), 3);
    }
}
