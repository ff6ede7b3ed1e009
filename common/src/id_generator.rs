use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Sleepy", "Brave", "Curious", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fuzzy", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Giggly",
];

const NOUNS: &[&str] = &[
    "Painter", "Poet", "Sketcher", "Muse", "Doodler", "Storyteller", "Easel", "Canvas",
    "Brush", "Crayon", "Pixel", "Quill", "Palette", "Critic", "Dreamer", "Scribe",
];

/// Suggests a display name for the lobby's name field.
pub fn suggest_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_name_has_two_words() {
        let name = suggest_player_name();
        let words: Vec<&str> = name.split(' ').collect();
        assert_eq!(words.len(), 2);
        assert!(ADJECTIVES.contains(&words[0]));
        assert!(NOUNS.contains(&words[1]));
    }
}
