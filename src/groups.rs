//! Static industry classifier.
//!
//! Maps fine-grained industry codes (1–90 in the reference extracts) into 14 coarse
//! industry groups. The mapping is a domain-modeling decision fixed at compile time:
//! it defines comparability across census years and is never computed or mutated at
//! runtime. A code outside every list is simply uncategorized.

/// One coarse industry group and the fine-grained codes it aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryGroup {
    /// Group name, used to form the output column `emp_<name>`.
    pub name: &'static str,
    /// Fine-grained industry codes belonging to this group.
    pub codes: &'static [u16],
}

/// The 14 industry groups, in output column order.
pub const INDUSTRY_GROUPS: [IndustryGroup; 14] = [
    // Agriculture, mining, extraction.
    IndustryGroup {
        name: "primary_industries",
        codes: &[1, 2, 3, 4],
    },
    // Meat, oils, dairy, grain, food, beverages, tobacco.
    IndustryGroup {
        name: "food_agriculture",
        codes: &[5, 6, 7, 8, 9, 10, 11, 12],
    },
    // Textiles, clothing, leather, footwear, wood, stone/cement.
    IndustryGroup {
        name: "manufacturing_traditional",
        codes: &[13, 14, 15, 16, 17, 24],
    },
    // Printing, coke, petroleum, pharma, chemicals, fibers, iron/steel, metals, casting.
    IndustryGroup {
        name: "manufacturing_industrial",
        codes: &[18, 19, 20, 21, 22, 23, 25, 26, 27],
    },
    // Appliances, electronics, transport equipment, furniture, sporting goods.
    IndustryGroup {
        name: "manufacturing_consumer",
        codes: &[28, 29, 30, 31, 32],
    },
    // Power, gas, water, construction, building, installation.
    IndustryGroup {
        name: "utilities_infrastructure",
        codes: &[33, 34, 35, 36, 37, 38],
    },
    // Auto repair/sales/fuel, transport modes, storage, travel.
    IndustryGroup {
        name: "automotive_transport",
        codes: &[39, 40, 41, 53, 54, 55, 56, 57, 58, 59, 60, 61],
    },
    IndustryGroup {
        name: "wholesale_trade",
        codes: &[42, 43, 44, 45, 46],
    },
    // Retail, personal goods repair, hotels, restaurants.
    IndustryGroup {
        name: "retail_consumer",
        codes: &[47, 48, 49, 50, 51, 52],
    },
    // Postal, courier, telecoms, IT/software.
    IndustryGroup {
        name: "communication_digital",
        codes: &[62, 63, 64, 73],
    },
    // Banking, insurance, financial services, real estate.
    IndustryGroup {
        name: "financial_services",
        codes: &[65, 66, 67, 68, 69],
    },
    // Equipment rental, research, legal, accounting, advertising, HR, professional.
    IndustryGroup {
        name: "business_services",
        codes: &[70, 71, 72, 74, 75, 76, 77, 78, 79, 87],
    },
    // Education, health, veterinary, social work, community services.
    IndustryGroup {
        name: "social_services",
        codes: &[80, 81, 82, 83, 85],
    },
    // Sanitation, arts, libraries, broadcasting, personal services.
    IndustryGroup {
        name: "entertainment_culture",
        codes: &[84, 86, 88, 89, 90],
    },
];

/// Returns the name of the group containing `code`, or `None` if uncategorized.
pub fn group_for_code(code: u16) -> Option<&'static str> {
    INDUSTRY_GROUPS
        .iter()
        .find(|g| g.codes.contains(&code))
        .map(|g| g.name)
}

/// Raw-table column name carrying employment for one fine-grained industry code.
pub fn industry_column(code: u16) -> String {
    format!("industry_emp_{code}")
}

/// Simplified-table column name carrying summed employment for one group.
pub fn group_column(name: &str) -> String {
    format!("emp_{name}")
}
