//! Per-category code assignment
//!
//! Each category hands out sequential codes from its base. The first time a
//! lexeme is seen it takes the next code; every later occurrence of the same
//! lexeme in the same category gets that code back.
use super::token::TokenCategory;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct CategoryCodes {
    assigned: HashMap<String, u32>,
}

/// Code memo for one tokenization run
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    categories: [CategoryCodes; 7],
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code for `lexeme` in `category`, assigning the next one if unseen
    pub fn code_for(&mut self, category: TokenCategory, lexeme: &str) -> u32 {
        let table = &mut self.categories[category.index()];
        if let Some(&code) = table.assigned.get(lexeme) {
            return code;
        }
        let code = category.base_code() + table.assigned.len() as u32;
        table.assigned.insert(lexeme.to_string(), code);
        code
    }

    /// Distinct lexemes seen in `category`
    pub fn distinct(&self, category: TokenCategory) -> usize {
        self.categories[category.index()].assigned.len()
    }

    /// Distinct lexemes across all categories
    pub fn distinct_total(&self) -> usize {
        self.categories.iter().map(|c| c.assigned.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_and_idempotent() {
        let mut table = CodeTable::new();
        assert_eq!(table.code_for(TokenCategory::Identifier, "x"), 201);
        assert_eq!(table.code_for(TokenCategory::Identifier, "y"), 202);
        assert_eq!(table.code_for(TokenCategory::Identifier, "x"), 201);
        assert_eq!(table.code_for(TokenCategory::Identifier, "z"), 203);
        assert_eq!(table.distinct(TokenCategory::Identifier), 3);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut table = CodeTable::new();
        assert_eq!(table.code_for(TokenCategory::String, "\"a\""), 601);
        assert_eq!(table.code_for(TokenCategory::Character, "'a'"), 701);
        assert_eq!(table.code_for(TokenCategory::Operator, "+"), 401);
        assert_eq!(table.code_for(TokenCategory::Operator, "-"), 402);
        assert_eq!(table.code_for(TokenCategory::String, "\"b\""), 602);
        assert_eq!(table.distinct_total(), 5);
    }

    #[test]
    fn test_same_text_in_two_categories() {
        let mut table = CodeTable::new();
        assert_eq!(table.code_for(TokenCategory::Identifier, "if"), 201);
        assert_eq!(table.code_for(TokenCategory::ReservedWord, "if"), 101);
    }
}
