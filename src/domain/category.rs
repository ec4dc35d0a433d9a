// Traffic category domain model

/// Counted traffic classes. Declaration order is the ordinal used as the
/// phase offset when synthesizing series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cars,
    Bikes,
    Buses,
    Trucks,
    Pedestrians,
}

impl Category {
    pub const COUNT: usize = 5;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Cars,
        Category::Bikes,
        Category::Buses,
        Category::Trucks,
        Category::Pedestrians,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Cars => "Cars",
            Category::Bikes => "Bikes",
            Category::Buses => "Buses",
            Category::Trucks => "Trucks",
            Category::Pedestrians => "Pedestrians",
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// One count per category, stored in category order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts([u32; Category::COUNT]);

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.ordinal()]
    }

    pub fn set(&mut self, category: Category, value: u32) {
        self.0[category.ordinal()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_declaration_order() {
        for (idx, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.ordinal(), idx);
        }
        assert_eq!(Category::Pedestrians.label(), "Pedestrians");
    }

    #[test]
    fn test_counts_iterate_in_category_order() {
        let mut counts = CategoryCounts::default();
        counts.set(Category::Buses, 7);
        counts.set(Category::Cars, 3);

        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(pairs.len(), Category::COUNT);
        assert_eq!(pairs[0], (Category::Cars, 3));
        assert_eq!(pairs[2], (Category::Buses, 7));
        assert_eq!(pairs[4], (Category::Pedestrians, 0));
    }
}
