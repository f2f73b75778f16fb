//! Static food tables.
//!
//! Calorie figures follow common per-100g reference values. Densities and
//! heights are rough plate-level approximations: grains and proteins sit
//! higher and denser than leafy vegetables.

use super::FoodKind;

/// Physical and nutritional constants for one food, before weight bounds are applied.
pub(crate) struct ProfileRow {
    pub kind: FoodKind,
    pub density_g_per_cm3: f64,
    pub assumed_height_cm: f64,
    pub kcal_per_100g: f64,
}

const fn row(kind: FoodKind, density: f64, height: f64, kcal: f64) -> ProfileRow {
    ProfileRow {
        kind,
        density_g_per_cm3: density,
        assumed_height_cm: height,
        kcal_per_100g: kcal,
    }
}

/// Density used for foods without a measured value.
pub(crate) const DEFAULT_DENSITY: f64 = 0.8;
/// Height used for foods without a specific value.
pub(crate) const DEFAULT_HEIGHT_CM: f64 = 3.0;

const LEAFY_HEIGHT_CM: f64 = 2.0;
const TALL_HEIGHT_CM: f64 = 4.0;

/// One row per [`FoodKind`], in declaration order.
pub(crate) const PROFILES: &[ProfileRow] = &[
    // Fruit
    row(FoodKind::Apple, 0.7, DEFAULT_HEIGHT_CM, 52.0),
    row(FoodKind::Orange, 0.6, DEFAULT_HEIGHT_CM, 47.0),
    row(FoodKind::Banana, 0.7, DEFAULT_HEIGHT_CM, 89.0),
    row(FoodKind::Grapes, 0.8, DEFAULT_HEIGHT_CM, 67.0),
    row(FoodKind::Strawberry, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 32.0),
    row(FoodKind::Mango, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 60.0),
    row(FoodKind::Pineapple, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 50.0),
    row(FoodKind::Watermelon, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 30.0),
    row(FoodKind::Lemon, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 29.0),
    // Vegetables
    row(FoodKind::Carrot, 0.7, DEFAULT_HEIGHT_CM, 41.0),
    row(FoodKind::Broccoli, 0.5, DEFAULT_HEIGHT_CM, 34.0),
    row(FoodKind::Lettuce, 0.3, LEAFY_HEIGHT_CM, 15.0),
    row(FoodKind::Tomato, 0.6, DEFAULT_HEIGHT_CM, 18.0),
    row(FoodKind::Onion, 0.6, DEFAULT_HEIGHT_CM, 40.0),
    row(FoodKind::Cucumber, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 16.0),
    row(FoodKind::Potato, 0.7, TALL_HEIGHT_CM, 77.0),
    row(FoodKind::SweetPotato, 0.8, DEFAULT_HEIGHT_CM, 86.0),
    row(FoodKind::Pepper, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 31.0),
    row(FoodKind::Cabbage, 0.4, LEAFY_HEIGHT_CM, 25.0),
    row(FoodKind::Spinach, 0.3, LEAFY_HEIGHT_CM, 23.0),
    row(FoodKind::Eggplant, 0.6, DEFAULT_HEIGHT_CM, 25.0),
    row(FoodKind::Zucchini, 0.6, DEFAULT_HEIGHT_CM, 17.0),
    row(FoodKind::Corn, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 96.0),
    row(FoodKind::GreenBeans, 0.5, DEFAULT_HEIGHT_CM, 31.0),
    row(FoodKind::Peas, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 81.0),
    // Legumes and grains
    row(FoodKind::Beans, 1.2, DEFAULT_HEIGHT_CM, 347.0),
    row(FoodKind::Lentils, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 353.0),
    row(FoodKind::Chickpeas, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 364.0),
    row(FoodKind::Soybeans, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 446.0),
    row(FoodKind::Quinoa, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 368.0),
    row(FoodKind::Rice, 0.8, DEFAULT_HEIGHT_CM, 130.0),
    // Proteins
    row(FoodKind::Chicken, 0.9, TALL_HEIGHT_CM, 165.0),
    row(FoodKind::Beef, 1.0, TALL_HEIGHT_CM, 250.0),
    row(FoodKind::Pork, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 242.0),
    row(FoodKind::Fish, 1.0, DEFAULT_HEIGHT_CM, 206.0),
    row(FoodKind::Shrimp, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 99.0),
    row(FoodKind::Egg, 0.9, DEFAULT_HEIGHT_CM, 155.0),
    row(FoodKind::Tofu, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 76.0),
    row(FoodKind::Turkey, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 189.0),
    // Starches
    row(FoodKind::Bread, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 265.0),
    row(FoodKind::Pizza, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 266.0),
    row(FoodKind::Pasta, 0.6, DEFAULT_HEIGHT_CM, 131.0),
    row(FoodKind::Noodles, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 138.0),
    row(FoodKind::Lasagna, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 132.0),
    row(FoodKind::Ravioli, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 142.0),
    // Dairy
    row(FoodKind::Cheese, 0.8, DEFAULT_HEIGHT_CM, 113.0),
    row(FoodKind::Milk, 1.0, DEFAULT_HEIGHT_CM, 42.0),
    row(FoodKind::Yogurt, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 59.0),
    row(FoodKind::Butter, 0.9, DEFAULT_HEIGHT_CM, 717.0),
    row(FoodKind::Cream, 1.0, DEFAULT_HEIGHT_CM, 345.0),
    row(FoodKind::Mozzarella, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 280.0),
    row(FoodKind::Parmesan, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 431.0),
    // Nuts and seeds
    row(FoodKind::Nuts, 0.6, DEFAULT_HEIGHT_CM, 607.0),
    row(FoodKind::Almonds, 0.6, DEFAULT_HEIGHT_CM, 579.0),
    row(FoodKind::Walnuts, 0.5, DEFAULT_HEIGHT_CM, 654.0),
    row(FoodKind::Peanuts, 0.6, DEFAULT_HEIGHT_CM, 567.0),
    row(FoodKind::Cashews, 0.6, DEFAULT_HEIGHT_CM, 553.0),
    row(FoodKind::Seeds, 0.6, DEFAULT_HEIGHT_CM, 559.0),
    row(FoodKind::SunflowerSeeds, 0.6, DEFAULT_HEIGHT_CM, 584.0),
    // Prepared dishes and snacks
    row(FoodKind::Sandwich, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 250.0),
    row(FoodKind::Hamburger, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 354.0),
    row(FoodKind::HotDog, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 290.0),
    row(FoodKind::FrenchFries, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 365.0),
    row(FoodKind::Salad, DEFAULT_DENSITY, LEAFY_HEIGHT_CM, 20.0),
    row(FoodKind::Soup, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 25.0),
    row(FoodKind::Cake, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 350.0),
    row(FoodKind::Donut, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 452.0),
    row(FoodKind::Cookie, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 488.0),
    row(FoodKind::Cracker, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 421.0),
    row(FoodKind::Chocolate, 1.2, DEFAULT_HEIGHT_CM, 546.0),
    row(FoodKind::IceCream, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 207.0),
    row(FoodKind::SoftDrink, 1.0, DEFAULT_HEIGHT_CM, 42.0),
    // Condiments and pantry
    row(FoodKind::Dressing, 1.0, DEFAULT_HEIGHT_CM, 450.0),
    row(FoodKind::Oil, 0.9, DEFAULT_HEIGHT_CM, 884.0),
    row(FoodKind::OliveOil, 0.9, DEFAULT_HEIGHT_CM, 884.0),
    row(FoodKind::Vinegar, 1.0, DEFAULT_HEIGHT_CM, 19.0),
    row(FoodKind::Salt, 1.2, DEFAULT_HEIGHT_CM, 0.0),
    row(FoodKind::Sugar, DEFAULT_DENSITY, DEFAULT_HEIGHT_CM, 387.0),
    row(FoodKind::Honey, 1.4, DEFAULT_HEIGHT_CM, 304.0),
    row(FoodKind::Jam, 1.3, DEFAULT_HEIGHT_CM, 265.0),
    row(FoodKind::Mustard, 1.0, DEFAULT_HEIGHT_CM, 66.0),
    row(FoodKind::Ketchup, 1.1, DEFAULT_HEIGHT_CM, 112.0),
    row(FoodKind::Mayonnaise, 0.9, DEFAULT_HEIGHT_CM, 680.0),
];

/// Alternate names, already in normalized form (lowercase, unaccented, single spaces).
///
/// Canonical names are indexed separately; only aliases belong here.
pub(crate) const SYNONYMS: &[(&str, FoodKind)] = &[
    ("maca", FoodKind::Apple),
    ("apples", FoodKind::Apple),
    ("laranja", FoodKind::Orange),
    ("grape", FoodKind::Grapes),
    ("uva", FoodKind::Grapes),
    ("uvas", FoodKind::Grapes),
    ("strawberries", FoodKind::Strawberry),
    ("morango", FoodKind::Strawberry),
    ("morangos", FoodKind::Strawberry),
    ("manga", FoodKind::Mango),
    ("abacaxi", FoodKind::Pineapple),
    ("melancia", FoodKind::Watermelon),
    ("limao", FoodKind::Lemon),
    ("carrots", FoodKind::Carrot),
    ("cenoura", FoodKind::Carrot),
    ("cenouras", FoodKind::Carrot),
    ("brocolis", FoodKind::Broccoli),
    ("alface", FoodKind::Lettuce),
    ("tomatoes", FoodKind::Tomato),
    ("tomate", FoodKind::Tomato),
    ("tomates", FoodKind::Tomato),
    ("cebola", FoodKind::Onion),
    ("cebolas", FoodKind::Onion),
    ("pepino", FoodKind::Cucumber),
    ("potatoes", FoodKind::Potato),
    ("batata", FoodKind::Potato),
    ("batatas", FoodKind::Potato),
    ("batata doce", FoodKind::SweetPotato),
    ("pimentao", FoodKind::Pepper),
    ("repolho", FoodKind::Cabbage),
    ("espinafre", FoodKind::Spinach),
    ("berinjela", FoodKind::Eggplant),
    ("abobrinha", FoodKind::Zucchini),
    ("milho", FoodKind::Corn),
    ("vagem", FoodKind::GreenBeans),
    ("feijao verde", FoodKind::GreenBeans),
    ("ervilha", FoodKind::Peas),
    ("ervilhas", FoodKind::Peas),
    ("feijao", FoodKind::Beans),
    ("lentilha", FoodKind::Lentils),
    ("lentilhas", FoodKind::Lentils),
    ("grao de bico", FoodKind::Chickpeas),
    ("soja", FoodKind::Soybeans),
    ("quinua", FoodKind::Quinoa),
    ("arroz", FoodKind::Rice),
    ("frango", FoodKind::Chicken),
    ("carne", FoodKind::Beef),
    ("bife", FoodKind::Beef),
    ("steak", FoodKind::Beef),
    ("porco", FoodKind::Pork),
    ("lombo", FoodKind::Pork),
    ("peixe", FoodKind::Fish),
    ("salmon", FoodKind::Fish),
    ("salmao", FoodKind::Fish),
    ("camarao", FoodKind::Shrimp),
    ("eggs", FoodKind::Egg),
    ("ovo", FoodKind::Egg),
    ("ovos", FoodKind::Egg),
    ("peru", FoodKind::Turkey),
    ("pao", FoodKind::Bread),
    ("macarrao", FoodKind::Pasta),
    ("massa", FoodKind::Pasta),
    ("spaghetti", FoodKind::Pasta),
    ("talharim", FoodKind::Noodles),
    ("lasanha", FoodKind::Lasagna),
    ("queijo", FoodKind::Cheese),
    ("leite", FoodKind::Milk),
    ("iogurte", FoodKind::Yogurt),
    ("manteiga", FoodKind::Butter),
    ("creme", FoodKind::Cream),
    ("mussarela", FoodKind::Mozzarella),
    ("parmesao", FoodKind::Parmesan),
    ("castanha", FoodKind::Nuts),
    ("castanhas", FoodKind::Nuts),
    ("amendoas", FoodKind::Almonds),
    ("nozes", FoodKind::Walnuts),
    ("amendoim", FoodKind::Peanuts),
    ("castanha de caju", FoodKind::Cashews),
    ("sementes", FoodKind::Seeds),
    ("semente de girassol", FoodKind::SunflowerSeeds),
    ("sanduiche", FoodKind::Sandwich),
    ("burger", FoodKind::Hamburger),
    ("hamburguer", FoodKind::Hamburger),
    ("hotdog", FoodKind::HotDog),
    ("fries", FoodKind::FrenchFries),
    ("batata frita", FoodKind::FrenchFries),
    ("salada", FoodKind::Salad),
    ("sopa", FoodKind::Soup),
    ("bolo", FoodKind::Cake),
    ("doughnut", FoodKind::Donut),
    ("rosquinha", FoodKind::Donut),
    ("cookies", FoodKind::Cookie),
    ("biscoito", FoodKind::Cookie),
    ("bolacha", FoodKind::Cracker),
    ("sorvete", FoodKind::IceCream),
    ("soda", FoodKind::SoftDrink),
    ("refrigerante", FoodKind::SoftDrink),
    ("molho", FoodKind::Dressing),
    ("oleo", FoodKind::Oil),
    ("azeite", FoodKind::OliveOil),
    ("vinagre", FoodKind::Vinegar),
    ("sal", FoodKind::Salt),
    ("acucar", FoodKind::Sugar),
    ("mel", FoodKind::Honey),
    ("geleia", FoodKind::Jam),
    ("mostarda", FoodKind::Mustard),
    ("maionese", FoodKind::Mayonnaise),
];
