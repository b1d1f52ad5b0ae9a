use rand::{Rng, seq::SliceRandom};

pub const EMPTY_QUESTION_REPLY: &str = "Please ask me a question about fashion! 💄";

const CLOSING_REMINDER: &str =
    "💡 Remember: The best outfit is one that makes you feel confident and comfortable!";

#[derive(Debug)]
pub struct Topic {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub advice: &'static [&'static str],
}

/// Checked in order; the first topic with a matching keyword wins.
pub const TOPICS: &[Topic] = &[
    Topic {
        name: "interview",
        keywords: &["interview", "job", "work", "business", "professional"],
        advice: &[
            "For job interviews, wear professional attire: dark suits (navy or black), white or light blue shirts, closed-toe shoes.",
            "Professional dress code: Conservative colors, well-fitted clothes, minimal jewelry, and polished shoes.",
            "Interview attire should be clean, pressed, and make you feel confident and professional.",
        ],
    },
    Topic {
        name: "casual",
        keywords: &["casual", "relaxed", "everyday", "comfortable"],
        advice: &[
            "Casual wear: Jeans with nice blouses or polo shirts, comfortable sneakers or flats.",
            "Casual outfits work well with denim, cotton shirts, and comfortable shoes for everyday activities.",
            "Keep casual wear clean, comfortable, and appropriate for the occasion.",
        ],
    },
    Topic {
        name: "formal",
        keywords: &["formal", "elegant", "dressy", "special"],
        advice: &[
            "Formal events require elegant attire: evening dresses, suits, or formal separates.",
            "Formal wear should be sophisticated: dark colors, quality fabrics, and appropriate accessories.",
            "Choose formal attire that fits well and makes you feel elegant and confident.",
        ],
    },
    Topic {
        name: "summer",
        keywords: &["summer", "hot", "warm", "season"],
        advice: &[
            "Summer fashion: Light fabrics like cotton and linen, bright colors, and breathable materials.",
            "Summer colors: Pastels, whites, light blues, and bright floral patterns work well.",
            "Summer accessories: Sun hats, sunglasses, and light scarves for style and protection.",
        ],
    },
    Topic {
        name: "colors",
        keywords: &["color", "blue", "red", "black", "white", "green"],
        advice: &[
            "Color coordination: Match complementary colors, use neutral tones as base, and add pops of color.",
            "Classic color combinations: Navy and white, black and white, or monochromatic schemes.",
            "Choose colors that complement your skin tone and make you feel confident.",
        ],
    },
    Topic {
        name: "accessories",
        keywords: &["accessory", "jewelry", "belt", "bag", "scarf"],
        advice: &[
            "Accessories: Simple jewelry, belts, scarves, and handbags can enhance any outfit.",
            "Less is more with accessories - choose pieces that complement rather than overwhelm your look.",
            "Quality accessories can elevate simple outfits and add personal style.",
        ],
    },
];

pub const GENERAL_TIPS: &[&str] = &[
    "Here are some general fashion tips: Always choose clothes that fit well and make you feel confident.",
    "Consider the occasion when selecting your outfit - dress appropriately for the setting.",
    "Quality over quantity - invest in a few well-made pieces rather than many cheap items.",
    "Don't forget about comfort - you should feel good in what you wear.",
];

/// Keywords match as substrings of the lowercased question.
pub fn match_topic(question: &str) -> Option<&'static Topic> {
    let question = question.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|kw| question.contains(kw)))
}

pub fn candidate_advice(question: &str) -> &'static [&'static str] {
    match_topic(question).map_or(GENERAL_TIPS, |topic| topic.advice)
}

pub fn pick_advice<R: Rng + ?Sized>(question: &str, rng: &mut R) -> &'static str {
    candidate_advice(question)
        .choose(rng)
        .copied()
        .unwrap_or(GENERAL_TIPS[0])
}

pub fn answer<R: Rng + ?Sized>(question: &str, rng: &mut R) -> String {
    if question.trim().is_empty() {
        return EMPTY_QUESTION_REPLY.to_string();
    }
    let advice = pick_advice(question, rng);
    format!("📚 **Fashion Knowledge Base:**\n\n{advice}\n\n{CLOSING_REMINDER}")
}
