use serde::{Deserialize, Serialize};

/// How an alias must appear in the normalized text to count as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Literal substring anywhere in the text.
    #[default]
    Substring,
    /// Substring bounded by non-alphanumeric characters, for short acronyms.
    Word,
}

/// One rubric term: a set of aliases sharing a label and a point weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub label: String,
    pub aliases: Vec<String>,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl LexiconEntry {
    pub fn new(label: &str, aliases: &[&str], weight: u32) -> Self {
        Self {
            label: label.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_ascii_lowercase()).collect(),
            weight,
            match_mode: MatchMode::Substring,
        }
    }

    pub fn word(label: &str, aliases: &[&str], weight: u32) -> Self {
        Self {
            match_mode: MatchMode::Word,
            ..Self::new(label, aliases, weight)
        }
    }

    /// True when any alias occurs in `text`. Presence only, repeated hits count once.
    pub fn matches(&self, text: &str) -> bool {
        self.aliases.iter().any(|alias| match self.match_mode {
            MatchMode::Substring => !alias.is_empty() && text.contains(alias.as_str()),
            MatchMode::Word => contains_word(text, alias),
        })
    }

    fn lowercased(mut self) -> Self {
        for alias in &mut self.aliases {
            *alias = alias.to_ascii_lowercase();
        }
        self
    }
}

/// Sum of the weights of every entry present in `text`, with the matched labels in table order.
pub fn sum_matches<'a>(entries: &'a [LexiconEntry], text: &str) -> (u32, Vec<&'a str>) {
    entries
        .iter()
        .filter(|entry| entry.matches(text))
        .fold((0, Vec::new()), |(total, mut labels), entry| {
            labels.push(entry.label.as_str());
            (total.saturating_add(entry.weight), labels)
        })
}

pub(crate) fn contains_word(text: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let bytes = text.as_bytes();
    text.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before && after
    })
}

/// Geographic markers for the shop's hiring area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locality {
    pub label: String,
    pub zip_prefixes: Vec<String>,
    pub cities: Vec<String>,
}

/// Every term table the rubric scores against. Built once and shared read-only.
///
/// Groups left out of a JSON rubric keep their built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub processes: Vec<LexiconEntry>,
    pub positions: Vec<LexiconEntry>,
    pub materials: Vec<LexiconEntry>,
    pub fit_up: Vec<LexiconEntry>,
    pub tools: Vec<LexiconEntry>,
    pub safety: Vec<LexiconEntry>,
    pub tank_work: Vec<LexiconEntry>,
    pub certifications: Vec<LexiconEntry>,
    pub local_employers: Vec<LexiconEntry>,
    pub relocation: Vec<LexiconEntry>,
    pub trade_keywords: Vec<String>,
    pub job_titles: Vec<String>,
    pub locality: Locality,
}

impl Lexicon {
    pub fn standard() -> Self {
        Self {
            processes: vec![
                LexiconEntry::new(
                    "FCAW",
                    &["fluxcore", "flux-core", "flux core", "fcaw", "semi-automatic"],
                    15,
                ),
                LexiconEntry::word("GMAW", &["mig", "gmaw", "wire feed", "wire welding"], 10),
                LexiconEntry::new("SMAW", &["stick", "smaw", "arc welding"], 5),
                LexiconEntry::word("GTAW", &["tig", "gtaw"], 10),
            ],
            positions: vec![LexiconEntry::word(
                "welding positions",
                &[
                    "1g", "2g", "3g", "4g", "5g", "6g", "1f", "2f", "3f", "4f",
                    "all position", "all positions", "out of position", "overhead",
                    "vertical up",
                ],
                2,
            )],
            materials: vec![
                LexiconEntry::new("stainless", &["stainless"], 10),
                LexiconEntry::new("carbon", &["carbon"], 10),
                LexiconEntry::new("steel", &["steel"], 5),
                LexiconEntry::new("aluminum", &["aluminum", "aluminium"], 2),
            ],
            fit_up: vec![
                LexiconEntry::new("blueprint", &["blueprint", "blue print", "print reading"], 5),
                LexiconEntry::new("tape measure", &["tape measure"], 3),
                LexiconEntry::word("math", &["math", "fractions"], 2),
            ],
            tools: [
                "grinder",
                "torch",
                "saw",
                "chipping hammer",
                "welder",
                "plasma",
                "beveler",
                "caliper",
                "micrometer",
                "square",
            ]
            .iter()
            .map(|tool| LexiconEntry::new(tool, &[tool], 1))
            .collect(),
            safety: vec![
                LexiconEntry::word("osha", &["osha"], 3),
                LexiconEntry::new("drug screen", &["drug"], 1),
                LexiconEntry::new("quality", &["quality"], 1),
                LexiconEntry::new("inspection", &["inspection"], 1),
            ],
            tank_work: vec![
                LexiconEntry::new("pressure vessel", &["pressure vessel", "vessel"], 1),
                LexiconEntry::new("tank fabrication", &["tank fabrication", "storage tank"], 1),
                LexiconEntry::new("api 650", &["api 650", "api-650"], 1),
                LexiconEntry::new("asme section viii", &["asme section viii", "asme viii"], 1),
            ],
            certifications: vec![
                LexiconEntry::word("aws", &["aws"], 7),
                LexiconEntry::word("asme", &["asme"], 7),
                LexiconEntry::word("api", &["api"], 7),
                LexiconEntry::new("welding school", &["welding school"], 5),
                LexiconEntry::word("6g", &["6g"], 3),
                LexiconEntry::word("3g", &["3g"], 3),
                LexiconEntry::new("certified", &["certified"], 3),
                LexiconEntry::new("weld test", &["weld test"], 3),
            ],
            local_employers: vec![
                LexiconEntry::new("Macaljon", &["macaljon", "mac aljon"], 15),
                LexiconEntry::new("Coastal Welding", &["coastal welding"], 12),
                LexiconEntry::new("Griffin Contracting", &["griffin contracting"], 8),
                LexiconEntry::word("JCB", &["jcb"], 5),
                LexiconEntry::new("Big John Trailers", &["big john trailers", "big john trailer"], 5),
            ],
            relocation: vec![LexiconEntry::new(
                "relocation",
                &["relocat", "willing to move", "open to moving"],
                1,
            )],
            trade_keywords: [
                "welder",
                "welding",
                "weld",
                "fabricator",
                "fabrication",
                "fitter",
                "pipefitter",
                "boilermaker",
            ]
            .iter()
            .map(|term| term.to_string())
            .collect(),
            job_titles: vec!["welder".to_string(), "welding".to_string()],
            locality: Locality::default(),
        }
    }

    /// Lowercases every alias so externally supplied tables match normalized text.
    pub fn into_lowercased(self) -> Self {
        let lower = |entries: Vec<LexiconEntry>| -> Vec<LexiconEntry> {
            entries.into_iter().map(LexiconEntry::lowercased).collect()
        };
        let lower_terms = |terms: Vec<String>| -> Vec<String> {
            terms.into_iter().map(|term| term.to_ascii_lowercase()).collect()
        };

        Self {
            processes: lower(self.processes),
            positions: lower(self.positions),
            materials: lower(self.materials),
            fit_up: lower(self.fit_up),
            tools: lower(self.tools),
            safety: lower(self.safety),
            tank_work: lower(self.tank_work),
            certifications: lower(self.certifications),
            local_employers: lower(self.local_employers),
            relocation: lower(self.relocation),
            trade_keywords: lower_terms(self.trade_keywords),
            job_titles: lower_terms(self.job_titles),
            locality: Locality {
                label: self.locality.label,
                zip_prefixes: self.locality.zip_prefixes,
                cities: lower_terms(self.locality.cities),
            },
        }
    }

    /// Named groups that are empty. A usable rubric has none.
    pub fn empty_groups(&self) -> Vec<&'static str> {
        let groups: [(&'static str, bool); 13] = [
            ("processes", self.processes.is_empty()),
            ("positions", self.positions.is_empty()),
            ("materials", self.materials.is_empty()),
            ("fit_up", self.fit_up.is_empty()),
            ("tools", self.tools.is_empty()),
            ("safety", self.safety.is_empty()),
            ("tank_work", self.tank_work.is_empty()),
            ("certifications", self.certifications.is_empty()),
            ("local_employers", self.local_employers.is_empty()),
            ("relocation", self.relocation.is_empty()),
            ("trade_keywords", self.trade_keywords.is_empty()),
            ("job_titles", self.job_titles.is_empty()),
            (
                "locality",
                self.locality.zip_prefixes.is_empty() && self.locality.cities.is_empty(),
            ),
        ];

        groups
            .into_iter()
            .filter_map(|(name, empty)| empty.then_some(name))
            .collect()
    }
}

impl Default for Locality {
    fn default() -> Self {
        Self {
            label: "Savannah area".to_string(),
            zip_prefixes: ["312", "313", "314", "315"]
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            cities: [
                "savannah",
                "pooler",
                "port wentworth",
                "garden city",
                "richmond hill",
            ]
            .iter()
            .map(|city| city.to_string())
            .collect(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard()
    }
}
