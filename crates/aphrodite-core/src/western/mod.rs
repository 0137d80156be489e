pub mod decans;
pub mod dignities;
pub mod rulers;

pub use decans::{decan_index, decan_info_for_sign_and_degree, decan_info_from_longitude, DecanInfo};
pub use dignities::{face_ruler, term_ruler, triplicity_rulers, Dignity, DignityEvaluator, DignityStatus};
pub use rulers::{exaltation, modern_ruler, rules, sign_ruler, sign_ruler_from_longitude, signs_ruled_by, traditional_ruler};
