//! Planet identifiers, traversal order and display copy.

use std::fmt;

/// One of the four destinations of the journey.
///
/// The declaration order is the scroll traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanetId {
    Earth,
    Mars,
    Jupiter,
    Saturn,
}

/// Fixed traversal order used by the scroll wheel.
pub const PLANET_ORDER: [PlanetId; 4] = [
    PlanetId::Earth,
    PlanetId::Mars,
    PlanetId::Jupiter,
    PlanetId::Saturn,
];

impl PlanetId {
    pub fn index(self) -> usize {
        match self {
            PlanetId::Earth => 0,
            PlanetId::Mars => 1,
            PlanetId::Jupiter => 2,
            PlanetId::Saturn => 3,
        }
    }

    /// Next planet in traversal order, `None` at the last one.
    pub fn next(self) -> Option<PlanetId> {
        PLANET_ORDER.get(self.index() + 1).copied()
    }

    /// Previous planet in traversal order, `None` at the first one.
    pub fn previous(self) -> Option<PlanetId> {
        self.index()
            .checked_sub(1)
            .and_then(|i| PLANET_ORDER.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            PlanetId::Earth => "Earth",
            PlanetId::Mars => "Mars",
            PlanetId::Jupiter => "Jupiter",
            PlanetId::Saturn => "Saturn",
        }
    }

    /// Lower-case slug, also used for texture file names.
    pub fn slug(self) -> &'static str {
        match self {
            PlanetId::Earth => "earth",
            PlanetId::Mars => "mars",
            PlanetId::Jupiter => "jupiter",
            PlanetId::Saturn => "saturn",
        }
    }

    pub fn texture_path(self) -> String {
        format!("textures/{}.jpg", self.slug())
    }

    pub fn has_rings(self) -> bool {
        matches!(self, PlanetId::Saturn)
    }

    pub fn facts(self) -> &'static PlanetFacts {
        &PLANET_FACTS[self.index()]
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Copy shown in the journey info card.
#[derive(Debug)]
pub struct PlanetFacts {
    pub description: &'static str,
    pub stats: [(&'static str, &'static str); 4],
}

const PLANET_FACTS: [PlanetFacts; 4] = [
    PlanetFacts {
        description: "Our home planet, teeming with life and covered in vast oceans. \
            Earth is the only known celestial body in our solar system that supports life as we know it.",
        stats: [
            ("Distance from Sun", "149.6 million km"),
            ("Rotation Period", "23.9 hours"),
            ("Orbital Period", "365.3 days"),
            ("Mean Temperature", "15°C"),
        ],
    },
    PlanetFacts {
        description: "The Red Planet, named after the Roman god of war, is home to the largest \
            volcano in our solar system, Olympus Mons, and a vast canyon system called Valles Marineris.",
        stats: [
            ("Distance from Sun", "227.9 million km"),
            ("Rotation Period", "24.6 hours"),
            ("Orbital Period", "687 days"),
            ("Mean Temperature", "-65°C"),
        ],
    },
    PlanetFacts {
        description: "The largest planet in our solar system, Jupiter is a gas giant with a \
            distinctive feature called the Great Red Spot, a massive storm that has been raging \
            for hundreds of years.",
        stats: [
            ("Distance from Sun", "778.5 million km"),
            ("Rotation Period", "9.9 hours"),
            ("Orbital Period", "11.9 years"),
            ("Moons", "79 confirmed"),
        ],
    },
    PlanetFacts {
        description: "Famous for its stunning ring system, Saturn is the second-largest planet in \
            our solar system. Its rings are made mostly of ice particles with a smaller amount of \
            rocky debris and dust.",
        stats: [
            ("Distance from Sun", "1.4 billion km"),
            ("Rotation Period", "10.7 hours"),
            ("Orbital Period", "29.5 years"),
            ("Moons", "82 confirmed"),
        ],
    },
];

/// Fact grid of the Earth detail view.
pub const EARTH_DETAIL_FACTS: [(&str, &str); 6] = [
    ("Mass", "5.97 × 10²⁴ kg"),
    ("Diameter", "12,742 km"),
    ("Gravity", "9.8 m/s²"),
    ("Day Length", "23.9 hours"),
    ("Atmosphere", "N₂, O₂, Ar, CO₂"),
    ("Surface Temp", "-88°C to 58°C"),
];

pub const EARTH_DETAIL_DESCRIPTION: &str = "Third planet from the Sun and the only astronomical \
    object known to harbor life. Earth's atmosphere primarily consists of nitrogen and oxygen, \
    with a protective ozone layer that shields the planet from harmful solar radiation.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_index() {
        for (i, planet) in PLANET_ORDER.iter().enumerate() {
            assert_eq!(planet.index(), i);
        }
    }

    #[test]
    fn test_next_and_previous_are_bounded() {
        assert_eq!(PlanetId::Earth.previous(), None);
        assert_eq!(PlanetId::Earth.next(), Some(PlanetId::Mars));
        assert_eq!(PlanetId::Jupiter.previous(), Some(PlanetId::Mars));
        assert_eq!(PlanetId::Saturn.next(), None);
    }

    #[test]
    fn test_only_saturn_has_rings() {
        let ringed: Vec<_> = PLANET_ORDER.iter().filter(|p| p.has_rings()).collect();
        assert_eq!(ringed, vec![&PlanetId::Saturn]);
    }

    #[test]
    fn test_texture_paths() {
        assert_eq!(PlanetId::Jupiter.texture_path(), "textures/jupiter.jpg");
        assert_eq!(PlanetId::Mars.to_string(), "Mars");
    }
}
