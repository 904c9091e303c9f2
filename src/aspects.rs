use crate::error::SelectionError;

/// The fixed critique vocabulary. Display order matches the order the labels
/// appear in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Composition,
    Lighting,
    FocusAndSharpness,
    Exposure,
    ColorBalance,
    CreativityAndImpact,
}

impl Aspect {
    pub const ALL: [Aspect; 6] = [
        Aspect::Composition,
        Aspect::Lighting,
        Aspect::FocusAndSharpness,
        Aspect::Exposure,
        Aspect::ColorBalance,
        Aspect::CreativityAndImpact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Aspect::Composition => "Composition",
            Aspect::Lighting => "Lighting",
            Aspect::FocusAndSharpness => "Focus and Sharpness",
            Aspect::Exposure => "Exposure",
            Aspect::ColorBalance => "Color Balance",
            Aspect::CreativityAndImpact => "Creativity and Impact",
        }
    }

    pub fn from_label(label: &str) -> Option<Aspect> {
        Aspect::ALL
            .into_iter()
            .find(|aspect| aspect.label() == label.trim())
    }
}

/// The three labels pre-checked when the page first loads.
pub const DEFAULT_SELECTION: [Aspect; 3] = [
    Aspect::Composition,
    Aspect::Lighting,
    Aspect::FocusAndSharpness,
];

/// Required number of aspects per submission.
pub const REQUIRED_ASPECT_COUNT: usize = 3;

/// An ordered, duplicate-free selection of exactly three aspects. Order is
/// the order the user picked them in, which is also the order the bullets
/// appear in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectSelection {
    aspects: Vec<Aspect>,
}

impl AspectSelection {
    pub fn new(aspects: Vec<Aspect>) -> Result<Self, SelectionError> {
        let mut seen = Vec::with_capacity(aspects.len());
        for aspect in &aspects {
            if seen.contains(aspect) {
                return Err(SelectionError::Duplicate(aspect.label()));
            }
            seen.push(*aspect);
        }

        if aspects.len() != REQUIRED_ASPECT_COUNT {
            return Err(SelectionError::WrongCount(aspects.len()));
        }

        Ok(AspectSelection { aspects })
    }

    pub fn as_slice(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn iter(&self) -> impl Iterator<Item = Aspect> + '_ {
        self.aspects.iter().copied()
    }

    pub fn contains(&self, aspect: Aspect) -> bool {
        self.aspects.contains(&aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_three_distinct_aspects() {
        let selection = AspectSelection::new(vec![
            Aspect::Exposure,
            Aspect::Composition,
            Aspect::ColorBalance,
        ])
        .unwrap();
        assert_eq!(
            selection.as_slice(),
            &[Aspect::Exposure, Aspect::Composition, Aspect::ColorBalance]
        );
    }

    #[test]
    fn rejects_every_wrong_count() {
        for count in [0usize, 1, 2, 4, 5, 6] {
            let aspects: Vec<Aspect> = Aspect::ALL.into_iter().take(count).collect();
            match AspectSelection::new(aspects) {
                Err(SelectionError::WrongCount(n)) => assert_eq!(n, count),
                other => panic!("count {count} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_duplicates_before_counting() {
        let result = AspectSelection::new(vec![
            Aspect::Lighting,
            Aspect::Lighting,
            Aspect::Composition,
        ]);
        assert!(matches!(result, Err(SelectionError::Duplicate("Lighting"))));
    }

    #[test]
    fn preserves_submission_order() {
        let selection = AspectSelection::new(vec![
            Aspect::CreativityAndImpact,
            Aspect::Lighting,
            Aspect::Exposure,
        ])
        .unwrap();
        let labels: Vec<&str> = selection.iter().map(Aspect::label).collect();
        assert_eq!(
            labels,
            vec!["Creativity and Impact", "Lighting", "Exposure"]
        );
    }

    #[test]
    fn parses_all_display_labels() {
        for aspect in Aspect::ALL {
            assert_eq!(Aspect::from_label(aspect.label()), Some(aspect));
        }
        assert_eq!(Aspect::from_label("Bokeh"), None);
    }
}
