use super::DishEntry;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DrawResult {
    pub dishes: Vec<DishEntry>,
}

impl DrawResult {
    pub fn len(&self) -> usize {
        self.dishes.len()
    }
}
