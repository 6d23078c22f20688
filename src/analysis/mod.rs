pub mod attention;
pub mod development;
pub mod normalize;
pub mod openrank;
pub mod reducer;
pub mod sustainability;
pub mod window;

use crate::models::score::Category;
use reducer::CategoryTable;

pub fn table_for(category: Category) -> &'static CategoryTable {
    match category {
        Category::Sustainability => &sustainability::TABLE,
        Category::Attention => &attention::TABLE,
        Category::Development => &development::TABLE,
        Category::Openrank => &openrank::TABLE,
    }
}
