//! Static health-education content shown on the health tips screen.

/// A single titled tip.
#[derive(Debug, Clone, Copy)]
pub struct TipItem {
    pub title: &'static str,
    pub description: &'static str,
}

/// A themed group of tips.
#[derive(Debug, Clone, Copy)]
pub struct TipSection {
    pub title: &'static str,
    pub items: &'static [TipItem],
}

pub const TIP_SECTIONS: &[TipSection] = &[
    TipSection {
        title: "Understanding Diabetes",
        items: &[
            TipItem {
                title: "What is Diabetes?",
                description: "Diabetes is a chronic condition where blood glucose levels are too high due to the body's inability to produce or use insulin effectively.",
            },
            TipItem {
                title: "Types of Diabetes",
                description: "Type 1: Autoimmune condition. Type 2: Most common, often lifestyle-related. Gestational: Occurs during pregnancy.",
            },
            TipItem {
                title: "Risk Factors",
                description: "Family history, obesity, sedentary lifestyle, high blood pressure, and age over 45 increase diabetes risk.",
            },
        ],
    },
    TipSection {
        title: "Prevention Strategies",
        items: &[
            TipItem {
                title: "Maintain Healthy Weight",
                description: "Even a 5-10% weight loss can significantly reduce diabetes risk. Focus on sustainable weight management.",
            },
            TipItem {
                title: "Regular Health Screenings",
                description: "Get blood glucose tested annually if you're over 45 or have risk factors. Early detection is key.",
            },
            TipItem {
                title: "Stress Management",
                description: "Chronic stress can affect blood sugar levels. Practice meditation, yoga, or other stress-reduction techniques.",
            },
        ],
    },
    TipSection {
        title: "Nutrition Guidelines",
        items: &[
            TipItem {
                title: "Balanced Diet",
                description: "Focus on whole foods: vegetables, fruits, lean proteins, whole grains, and healthy fats. Limit processed foods.",
            },
            TipItem {
                title: "Portion Control",
                description: "Use the plate method: 1/2 plate vegetables, 1/4 lean protein, 1/4 whole grains. Control portion sizes.",
            },
            TipItem {
                title: "Limit Sugar & Refined Carbs",
                description: "Reduce sugary drinks, sweets, and refined carbohydrates. Choose complex carbs with fiber.",
            },
        ],
    },
    TipSection {
        title: "Exercise & Activity",
        items: &[
            TipItem {
                title: "Regular Physical Activity",
                description: "Aim for 150 minutes of moderate aerobic activity weekly, plus 2 days of strength training.",
            },
            TipItem {
                title: "Start Gradually",
                description: "Begin with short walks and gradually increase intensity. Even 10-minute walks after meals help control blood sugar.",
            },
            TipItem {
                title: "Find Activities You Enjoy",
                description: "Dancing, swimming, cycling, or sports make exercise sustainable. Consistency is more important than intensity.",
            },
        ],
    },
];

pub const QUICK_TIPS: &[&str] = &[
    "Stay hydrated with water throughout the day",
    "Get 7-9 hours of quality sleep each night",
    "Monitor your blood pressure regularly",
    "Quit smoking and limit alcohol consumption",
    "Include fiber-rich foods in every meal",
    "Take regular breaks from sitting",
    "Practice portion control with smaller plates",
    "Keep healthy snacks readily available",
];
