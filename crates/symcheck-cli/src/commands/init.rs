//! The `symcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("assessment.json");
    if path.exists() {
        println!("assessment.json already exists, skipping.");
    } else {
        std::fs::write(path, STARTER_DEFINITION)?;
        println!("Created assessment.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit assessment.json with your questions and scoring rules");
    println!("  2. Run: symcheck validate --definition assessment.json");
    println!("  3. Run: symcheck run --definition assessment.json");

    Ok(())
}

const STARTER_DEFINITION: &str = r##"{
    "id": "fatigue-check",
    "title": "Fatigue Self-Assessment",
    "description": "A short screening quiz about day-to-day tiredness.",
    "questions": [
        {
            "kind": "choice",
            "prompt": "How often do you feel exhausted during the day?",
            "description": "Think about the last two weeks.",
            "options": [
                {"value": "never", "weight": 0, "text": "Never"},
                {"value": "sometimes", "weight": 1, "text": "Sometimes"},
                {"value": "often", "weight": 2, "text": "Often"},
                {"value": "daily", "weight": 3, "text": "Every day"}
            ]
        },
        {
            "kind": "choice",
            "prompt": "Does tiredness keep you from things you want to do?",
            "options": [
                {"value": "no", "weight": 0, "text": "No"},
                {"value": "occasionally", "weight": 1, "text": "Occasionally"},
                {"value": "frequently", "weight": 3, "text": "Frequently"}
            ]
        },
        {
            "kind": "scale",
            "prompt": "How severe is your tiredness at its worst?",
            "options": [
                {"value": 0, "weight": 0},
                {"value": 1, "weight": 1},
                {"value": 2, "weight": 2},
                {"value": 3, "weight": 3}
            ],
            "scaleLabels": {"min": "Barely noticeable", "max": "Overwhelming"}
        }
    ],
    "scoringRules": {
        "low": {"maxScore": 3, "label": "Low risk", "color": "#2e7d32"},
        "moderate": {"maxScore": 6, "label": "Moderate risk", "color": "#f9a825"},
        "high": {"maxScore": 9, "label": "High risk", "color": "#c62828"}
    },
    "recommendations": {
        "low": ["Keep your current sleep routine."],
        "moderate": [
            "Review your sleep schedule.",
            "Cut back on caffeine late in the day."
        ],
        "high": [
            "Talk to a clinician about persistent fatigue.",
            "Track your sleep for two weeks and bring the log along."
        ]
    },
    "maxScore": 9,
    "autoAdvanceEnabled": true
}
"##;
