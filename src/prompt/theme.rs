//! Image series themes.

/// A named progression an image series walks through.
#[derive(Debug)]
pub struct SeriesTheme {
    pub id: &'static str,
    pub title: &'static str,
    /// Step descriptors, cycled when a series is longer than the list.
    pub steps: &'static [&'static str],
}

impl SeriesTheme {
    /// Descriptor for the `index`-th image.
    pub fn step(&self, index: usize) -> &'static str {
        self.steps[index % self.steps.len()]
    }
}

pub static THEMES: &[SeriesTheme] = &[
    SeriesTheme {
        id: "seasons",
        title: "Through the Seasons",
        steps: &[
            "in early spring with fresh blossoms",
            "in high summer under bright sun",
            "in autumn with falling leaves",
            "in winter with a quiet frost",
        ],
    },
    SeriesTheme {
        id: "time-of-day",
        title: "From Dawn to Night",
        steps: &[
            "at dawn in pale first light",
            "at midday in crisp even light",
            "at golden hour in long warm light",
            "at dusk under a violet sky",
            "at night under lamplight",
        ],
    },
    SeriesTheme {
        id: "moods",
        title: "Shifting Moods",
        steps: &[
            "with a calm and serene mood",
            "with a playful and energetic mood",
            "with a dramatic and bold mood",
            "with a nostalgic and soft mood",
        ],
    },
    SeriesTheme {
        id: "evolution",
        title: "Step by Step",
        steps: &[
            "as a first rough sketch",
            "half finished, with the structure in place",
            "nearly complete, with details emerging",
            "fully finished and polished",
        ],
    },
];

/// Look up a theme by id (case-insensitive).
pub fn theme(id: &str) -> Option<&'static SeriesTheme> {
    let id = id.trim();
    THEMES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(theme("Seasons").unwrap().title, "Through the Seasons");
        assert!(theme("weather").is_none());
    }

    #[test]
    fn test_steps_cycle() {
        let seasons = theme("seasons").unwrap();
        assert_eq!(seasons.step(4), seasons.step(0));
        assert_eq!(seasons.step(9), seasons.step(1));
    }
}
