//! Food knowledge base: physical and nutritional constants per food.
//!
//! Foods form a closed set ([`FoodKind`]). Names coming from detectors or
//! filenames are resolved through a static index of canonical names and
//! synonyms, so a lookup is one normalization pass plus one hash lookup.

mod table;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use table::{PROFILES, SYNONYMS};

/// Default lower bound for a single food item, in grams.
pub const DEFAULT_MIN_WEIGHT_G: f64 = 30.0;
/// Default upper bound for a single food item, in grams.
pub const DEFAULT_MAX_WEIGHT_G: f64 = 400.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Apple,
    Orange,
    Banana,
    Grapes,
    Strawberry,
    Mango,
    Pineapple,
    Watermelon,
    Lemon,
    Carrot,
    Broccoli,
    Lettuce,
    Tomato,
    Onion,
    Cucumber,
    Potato,
    SweetPotato,
    Pepper,
    Cabbage,
    Spinach,
    Eggplant,
    Zucchini,
    Corn,
    GreenBeans,
    Peas,
    Beans,
    Lentils,
    Chickpeas,
    Soybeans,
    Quinoa,
    Rice,
    Chicken,
    Beef,
    Pork,
    Fish,
    Shrimp,
    Egg,
    Tofu,
    Turkey,
    Bread,
    Pizza,
    Pasta,
    Noodles,
    Lasagna,
    Ravioli,
    Cheese,
    Milk,
    Yogurt,
    Butter,
    Cream,
    Mozzarella,
    Parmesan,
    Nuts,
    Almonds,
    Walnuts,
    Peanuts,
    Cashews,
    Seeds,
    SunflowerSeeds,
    Sandwich,
    Hamburger,
    HotDog,
    FrenchFries,
    Salad,
    Soup,
    Cake,
    Donut,
    Cookie,
    Cracker,
    Chocolate,
    IceCream,
    SoftDrink,
    Dressing,
    Oil,
    OliveOil,
    Vinegar,
    Salt,
    Sugar,
    Honey,
    Jam,
    Mustard,
    Ketchup,
    Mayonnaise,
}

impl FoodKind {
    /// Every food, in declaration order.
    pub const ALL: [FoodKind; 83] = [
        FoodKind::Apple,
        FoodKind::Orange,
        FoodKind::Banana,
        FoodKind::Grapes,
        FoodKind::Strawberry,
        FoodKind::Mango,
        FoodKind::Pineapple,
        FoodKind::Watermelon,
        FoodKind::Lemon,
        FoodKind::Carrot,
        FoodKind::Broccoli,
        FoodKind::Lettuce,
        FoodKind::Tomato,
        FoodKind::Onion,
        FoodKind::Cucumber,
        FoodKind::Potato,
        FoodKind::SweetPotato,
        FoodKind::Pepper,
        FoodKind::Cabbage,
        FoodKind::Spinach,
        FoodKind::Eggplant,
        FoodKind::Zucchini,
        FoodKind::Corn,
        FoodKind::GreenBeans,
        FoodKind::Peas,
        FoodKind::Beans,
        FoodKind::Lentils,
        FoodKind::Chickpeas,
        FoodKind::Soybeans,
        FoodKind::Quinoa,
        FoodKind::Rice,
        FoodKind::Chicken,
        FoodKind::Beef,
        FoodKind::Pork,
        FoodKind::Fish,
        FoodKind::Shrimp,
        FoodKind::Egg,
        FoodKind::Tofu,
        FoodKind::Turkey,
        FoodKind::Bread,
        FoodKind::Pizza,
        FoodKind::Pasta,
        FoodKind::Noodles,
        FoodKind::Lasagna,
        FoodKind::Ravioli,
        FoodKind::Cheese,
        FoodKind::Milk,
        FoodKind::Yogurt,
        FoodKind::Butter,
        FoodKind::Cream,
        FoodKind::Mozzarella,
        FoodKind::Parmesan,
        FoodKind::Nuts,
        FoodKind::Almonds,
        FoodKind::Walnuts,
        FoodKind::Peanuts,
        FoodKind::Cashews,
        FoodKind::Seeds,
        FoodKind::SunflowerSeeds,
        FoodKind::Sandwich,
        FoodKind::Hamburger,
        FoodKind::HotDog,
        FoodKind::FrenchFries,
        FoodKind::Salad,
        FoodKind::Soup,
        FoodKind::Cake,
        FoodKind::Donut,
        FoodKind::Cookie,
        FoodKind::Cracker,
        FoodKind::Chocolate,
        FoodKind::IceCream,
        FoodKind::SoftDrink,
        FoodKind::Dressing,
        FoodKind::Oil,
        FoodKind::OliveOil,
        FoodKind::Vinegar,
        FoodKind::Salt,
        FoodKind::Sugar,
        FoodKind::Honey,
        FoodKind::Jam,
        FoodKind::Mustard,
        FoodKind::Ketchup,
        FoodKind::Mayonnaise,
    ];

    /// Canonical lowercase name, also the primary lookup key.
    pub fn name(self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Orange => "orange",
            FoodKind::Banana => "banana",
            FoodKind::Grapes => "grapes",
            FoodKind::Strawberry => "strawberry",
            FoodKind::Mango => "mango",
            FoodKind::Pineapple => "pineapple",
            FoodKind::Watermelon => "watermelon",
            FoodKind::Lemon => "lemon",
            FoodKind::Carrot => "carrot",
            FoodKind::Broccoli => "broccoli",
            FoodKind::Lettuce => "lettuce",
            FoodKind::Tomato => "tomato",
            FoodKind::Onion => "onion",
            FoodKind::Cucumber => "cucumber",
            FoodKind::Potato => "potato",
            FoodKind::SweetPotato => "sweet potato",
            FoodKind::Pepper => "pepper",
            FoodKind::Cabbage => "cabbage",
            FoodKind::Spinach => "spinach",
            FoodKind::Eggplant => "eggplant",
            FoodKind::Zucchini => "zucchini",
            FoodKind::Corn => "corn",
            FoodKind::GreenBeans => "green beans",
            FoodKind::Peas => "peas",
            FoodKind::Beans => "beans",
            FoodKind::Lentils => "lentils",
            FoodKind::Chickpeas => "chickpeas",
            FoodKind::Soybeans => "soybeans",
            FoodKind::Quinoa => "quinoa",
            FoodKind::Rice => "rice",
            FoodKind::Chicken => "chicken",
            FoodKind::Beef => "beef",
            FoodKind::Pork => "pork",
            FoodKind::Fish => "fish",
            FoodKind::Shrimp => "shrimp",
            FoodKind::Egg => "egg",
            FoodKind::Tofu => "tofu",
            FoodKind::Turkey => "turkey",
            FoodKind::Bread => "bread",
            FoodKind::Pizza => "pizza",
            FoodKind::Pasta => "pasta",
            FoodKind::Noodles => "noodles",
            FoodKind::Lasagna => "lasagna",
            FoodKind::Ravioli => "ravioli",
            FoodKind::Cheese => "cheese",
            FoodKind::Milk => "milk",
            FoodKind::Yogurt => "yogurt",
            FoodKind::Butter => "butter",
            FoodKind::Cream => "cream",
            FoodKind::Mozzarella => "mozzarella",
            FoodKind::Parmesan => "parmesan",
            FoodKind::Nuts => "nuts",
            FoodKind::Almonds => "almonds",
            FoodKind::Walnuts => "walnuts",
            FoodKind::Peanuts => "peanuts",
            FoodKind::Cashews => "cashews",
            FoodKind::Seeds => "seeds",
            FoodKind::SunflowerSeeds => "sunflower seeds",
            FoodKind::Sandwich => "sandwich",
            FoodKind::Hamburger => "hamburger",
            FoodKind::HotDog => "hot dog",
            FoodKind::FrenchFries => "french fries",
            FoodKind::Salad => "salad",
            FoodKind::Soup => "soup",
            FoodKind::Cake => "cake",
            FoodKind::Donut => "donut",
            FoodKind::Cookie => "cookie",
            FoodKind::Cracker => "cracker",
            FoodKind::Chocolate => "chocolate",
            FoodKind::IceCream => "ice cream",
            FoodKind::SoftDrink => "soft drink",
            FoodKind::Dressing => "dressing",
            FoodKind::Oil => "oil",
            FoodKind::OliveOil => "olive oil",
            FoodKind::Vinegar => "vinegar",
            FoodKind::Salt => "salt",
            FoodKind::Sugar => "sugar",
            FoodKind::Honey => "honey",
            FoodKind::Jam => "jam",
            FoodKind::Mustard => "mustard",
            FoodKind::Ketchup => "ketchup",
            FoodKind::Mayonnaise => "mayonnaise",
        }
    }

    /// Title-cased name for reports, e.g. "Sweet Potato".
    pub fn display_name(self) -> String {
        self.name()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve a free-form name (any case, accents, `_`/`-` separators) to a food.
    pub fn resolve(name: &str) -> Option<FoodKind> {
        NAME_INDEX.get(normalize_name(name).as_str()).copied()
    }
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NAME_INDEX: LazyLock<HashMap<String, FoodKind>> = LazyLock::new(|| {
    let mut index: HashMap<String, FoodKind> = FoodKind::ALL
        .iter()
        .map(|kind| (kind.name().to_string(), *kind))
        .collect();
    for (alias, kind) in SYNONYMS {
        index.insert((*alias).to_string(), *kind);
    }
    index
});

/// Normalize a name or identifier for matching.
///
/// Lowercases, folds common Latin accents and collapses every run of
/// non-alphanumeric characters into a single space.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.to_lowercase().chars().map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown food: {name}")]
pub struct UnknownFood {
    pub name: String,
}

/// A profile that violates the physical invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{food}: density must be positive, got {value}")]
    NonPositiveDensity { food: FoodKind, value: f64 },
    #[error("{food}: assumed height must be positive, got {value}")]
    NonPositiveHeight { food: FoodKind, value: f64 },
    #[error("{food}: calories per 100g must not be negative, got {value}")]
    NegativeCalories { food: FoodKind, value: f64 },
    #[error("{food}: weight bounds inverted ({min} > {max})")]
    InvertedBounds { food: FoodKind, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FoodProfile {
    pub kind: FoodKind,
    pub density_g_per_cm3: f64,
    pub assumed_height_cm: f64,
    pub kcal_per_100g: f64,
    pub min_weight_g: f64,
    pub max_weight_g: f64,
}

impl FoodProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        let food = self.kind;
        if !is_positive(self.density_g_per_cm3) {
            return Err(ProfileError::NonPositiveDensity {
                food,
                value: self.density_g_per_cm3,
            });
        }
        if !is_positive(self.assumed_height_cm) {
            return Err(ProfileError::NonPositiveHeight {
                food,
                value: self.assumed_height_cm,
            });
        }
        if !self.kcal_per_100g.is_finite() || self.kcal_per_100g < 0.0 {
            return Err(ProfileError::NegativeCalories {
                food,
                value: self.kcal_per_100g,
            });
        }
        if self.min_weight_g > self.max_weight_g {
            return Err(ProfileError::InvertedBounds {
                food,
                min: self.min_weight_g,
                max: self.max_weight_g,
            });
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Plausible weight range applied to every food item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    pub min_g: f64,
    pub max_g: f64,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            min_g: DEFAULT_MIN_WEIGHT_G,
            max_g: DEFAULT_MAX_WEIGHT_G,
        }
    }
}

/// Read-only table of food profiles, built once at startup.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    // Indexed by `FoodKind as usize`.
    profiles: Vec<FoodProfile>,
}

impl KnowledgeBase {
    /// Built-in profiles with default bounds and heights.
    pub fn builtin() -> Self {
        Self::with_overrides(WeightBounds::default(), &HashMap::new())
    }

    /// Built-in profiles with custom weight bounds and per-food height overrides.
    pub fn with_overrides(bounds: WeightBounds, heights: &HashMap<FoodKind, f64>) -> Self {
        let profiles = PROFILES
            .iter()
            .map(|row| FoodProfile {
                kind: row.kind,
                density_g_per_cm3: row.density_g_per_cm3,
                assumed_height_cm: heights
                    .get(&row.kind)
                    .copied()
                    .unwrap_or(row.assumed_height_cm),
                kcal_per_100g: row.kcal_per_100g,
                min_weight_g: bounds.min_g,
                max_weight_g: bounds.max_g,
            })
            .collect();
        Self { profiles }
    }

    /// Find the profile for a detector label or synonym.
    pub fn lookup(&self, name: &str) -> Result<&FoodProfile, UnknownFood> {
        FoodKind::resolve(name)
            .map(|kind| self.profile(kind))
            .ok_or_else(|| UnknownFood {
                name: name.to_string(),
            })
    }

    pub fn profile(&self, kind: FoodKind) -> &FoodProfile {
        &self.profiles[kind as usize]
    }

    pub fn profiles(&self) -> impl Iterator<Item = &FoodProfile> {
        self.profiles.iter()
    }

    /// Every normalized name and synonym with the food it resolves to.
    pub fn keywords(&self) -> impl Iterator<Item = (&'static str, FoodKind)> {
        FoodKind::ALL
            .iter()
            .map(|kind| (kind.name(), *kind))
            .chain(SYNONYMS.iter().copied())
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        self.profiles.iter().try_for_each(FoodProfile::validate)
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
