//! Rule-based extraction engine
//!
//! Splits text into sentences and, for each sentence, locates the first verb
//! group using a small English lexicon plus auxiliary chains. Everything
//! before the verb group is the subject; everything after is split at
//! prepositions into object arguments.
//!
//! The engine is deliberately shallow: no tagging or parsing, but it is
//! deterministic and needs no external toolkit.

use std::collections::HashSet;

use regex::Regex;

use openie_core::{Extraction, ExtractionEngine, OpenIeError, Result};

/// Auxiliary and modal verbs that may open a verb group
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "has", "have", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

/// Forms of "to be" (including contracted negations) that make a participle passive
const BE_FORMS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "isn't", "aren't", "wasn't",
    "weren't",
];

const NEGATIONS: &[&str] = &["not", "never"];

/// Irregular past participles not caught by the -ed suffix rule
///
/// Strong -en forms are listed explicitly; a bare -en suffix also matches
/// adverbs and adjectives such as "often" or "golden".
const PARTICIPLES: &[&str] = &[
    "built", "bought", "brought", "caught", "done", "found", "held", "kept", "led", "left", "made",
    "met", "paid", "sent", "sold", "taught", "thought", "told", "won", "hit", "put", "set", "read",
    "beaten", "bitten", "born", "broken", "chosen", "drawn", "driven", "eaten", "fallen",
    "flown", "forbidden", "forgiven", "forgotten", "frozen", "given", "grown", "hidden", "known",
    "ridden", "risen", "seen", "shaken", "shown", "spoken", "stolen", "sworn", "taken", "thrown",
    "torn", "woken", "worn", "written",
];

/// Finite and base forms of common content verbs
const VERBS: &[&str] = &[
    "give", "gives", "gave", "take", "takes", "took", "make", "makes", "made", "say", "says",
    "said", "tell", "tells", "told", "go", "goes", "went", "win", "wins", "won", "lose", "loses",
    "lost", "build", "builds", "built", "write", "writes", "wrote", "found", "founded", "buy",
    "buys", "bought", "sell", "sells", "sold", "own", "owns", "owned", "create", "creates",
    "created", "invent", "invents", "invented", "discover", "discovers", "discovered", "visit",
    "visits", "visited", "meet", "meets", "met", "marry", "marries", "married", "join", "joins",
    "joined", "leave", "leaves", "left", "lead", "leads", "led", "sign", "signs", "signed",
    "announce", "announces", "announced", "release", "releases", "released", "acquire",
    "acquires", "acquired", "launch", "launches", "launched", "publish", "publishes",
    "published", "receive", "receives", "received", "send", "sends", "sent", "produce",
    "produces", "produced", "develop", "develops", "developed", "open", "opens", "opened",
    "start", "starts", "started", "become", "becomes", "became", "live", "lives", "lived",
    "work", "works", "worked", "move", "moves", "moved", "study", "studies", "studied", "teach",
    "teaches", "taught", "play", "plays", "played", "want", "wants", "wanted", "like", "likes",
    "liked", "love", "loves", "loved", "know", "knows", "knew", "see", "sees", "saw", "find",
    "finds", "use", "uses", "used", "contain", "contains", "contained", "include", "includes",
    "included", "eat", "eats", "ate", "run", "runs", "ran", "bite", "bites", "bit", "kill",
    "kills", "killed", "direct", "directs", "directed", "paint", "paints", "painted", "compose",
    "composes", "composed", "design", "designs", "designed", "hold", "holds", "held", "pay",
    "pays", "paid", "bring", "brings", "brought", "keep", "keeps", "kept", "show", "shows",
    "showed", "speak", "speaks", "spoke", "born",
];

/// Words that start a new object argument
const PREPOSITIONS: &[&str] = &[
    "on", "in", "at", "to", "from", "with", "for", "by", "during", "after", "before", "about",
    "into", "over", "under", "through", "since", "until", "near", "across",
];

/// Subordinating words whose leading clause becomes the extraction context
const CONTEXT_MARKERS: &[&str] = &[
    "if", "when", "although", "though", "because", "while", "unless", "whereas", "once",
];

const CONFIDENCE_WITH_OBJECTS: f64 = 0.9;
const CONFIDENCE_WITHOUT_OBJECTS: f64 = 0.7;

/// Verb group located inside a sentence
#[derive(Debug)]
struct VerbGroup {
    start: usize,
    end: usize,
    negated: bool,
    passive: bool,
}

/// Rule-based open information extraction engine
pub struct PatternEngine {
    sentence_re: Regex,
    auxiliaries: HashSet<&'static str>,
    be_forms: HashSet<&'static str>,
    negations: HashSet<&'static str>,
    participles: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    context_markers: HashSet<&'static str>,
}

impl PatternEngine {
    /// Create an engine with the built-in English lexicon
    pub fn new() -> Result<Self> {
        let sentence_re = Regex::new(r"[^.!?]+")
            .map_err(|e| OpenIeError::ConfigError(format!("invalid sentence pattern: {e}")))?;

        Ok(Self {
            sentence_re,
            auxiliaries: AUXILIARIES.iter().copied().collect(),
            be_forms: BE_FORMS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            participles: PARTICIPLES.iter().copied().collect(),
            verbs: VERBS.iter().copied().collect(),
            prepositions: PREPOSITIONS.iter().copied().collect(),
            context_markers: CONTEXT_MARKERS.iter().copied().collect(),
        })
    }

    /// Add extra verb forms to the lexicon
    pub fn with_verbs(mut self, verbs: &[&'static str]) -> Self {
        self.verbs.extend(verbs.iter().copied());
        self
    }

    /// Extract at most one fact per sentence
    pub fn extract_sync(&self, text: &str) -> Vec<Extraction> {
        self.sentence_re
            .find_iter(text)
            .filter_map(|m| self.extract_sentence(m.as_str()))
            .collect()
    }

    fn extract_sentence(&self, sentence: &str) -> Option<Extraction> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return None;
        }

        let (context, clause) = self.split_context(sentence);
        let tokens = tokenize(clause);
        let group = (1..tokens.len()).find_map(|i| self.verb_group(&tokens, i))?;

        let subject = tokens[..group.start].join(" ");
        let relation = tokens[group.start..group.end].join(" ");
        let objects = self.split_objects(&tokens[group.end..]);
        let confidence = if objects.is_empty() {
            CONFIDENCE_WITHOUT_OBJECTS
        } else {
            CONFIDENCE_WITH_OBJECTS
        };

        Some(
            Extraction::new(subject, relation, objects)
                .with_confidence(confidence)
                .with_context(context)
                .negated(group.negated)
                .passive(group.passive),
        )
    }

    /// Split "If it rains, the match is cancelled" into context and main clause
    fn split_context<'a>(&self, sentence: &'a str) -> (&'a str, &'a str) {
        let first = sentence
            .split_whitespace()
            .next()
            .map(str::to_lowercase)
            .unwrap_or_default();

        if self.context_markers.contains(first.as_str()) {
            if let Some((context, clause)) = sentence.split_once(',') {
                return (context.trim(), clause.trim());
            }
        }
        ("", sentence)
    }

    fn verb_group(&self, tokens: &[&str], start: usize) -> Option<VerbGroup> {
        let first = tokens[start].to_lowercase();

        if !(self.auxiliaries.contains(first.as_str()) || first.ends_with("n't")) {
            return self.verbs.contains(first.as_str()).then_some(VerbGroup {
                start,
                end: start + 1,
                negated: false,
                passive: false,
            });
        }

        let mut negated = first.ends_with("n't");
        let mut has_be = self.be_forms.contains(first.as_str());
        let mut end = start + 1;

        while let Some(word) = tokens.get(end).map(|t| t.to_lowercase()) {
            if self.negations.contains(word.as_str()) {
                negated = true;
            } else if self.auxiliaries.contains(word.as_str()) {
                has_be |= self.be_forms.contains(word.as_str());
            } else {
                break;
            }
            end += 1;
        }

        let mut passive = false;
        if let Some(word) = tokens.get(end).map(|t| t.to_lowercase()) {
            if self.is_main_verb(&word) {
                passive = has_be && self.is_participle(&word);
                end += 1;
            }
        }

        if passive && tokens.get(end).is_some_and(|t| t.eq_ignore_ascii_case("by")) {
            end += 1;
        }

        Some(VerbGroup {
            start,
            end,
            negated,
            passive,
        })
    }

    fn is_main_verb(&self, word: &str) -> bool {
        self.verbs.contains(word) || self.is_participle(word) || word.ends_with("ing")
    }

    fn is_participle(&self, word: &str) -> bool {
        self.participles.contains(word) || word.ends_with("ed")
    }

    /// Group the tail of a sentence into arguments, starting a new one at each preposition
    fn split_objects(&self, tokens: &[&str]) -> Vec<String> {
        let mut objects = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for &token in tokens {
            if self.prepositions.contains(token.to_lowercase().as_str()) && !current.is_empty() {
                objects.push(current.join(" "));
                current.clear();
            }
            current.push(token);
        }
        if !current.is_empty() {
            objects.push(current.join(" "));
        }
        objects
    }
}

fn tokenize(clause: &str) -> Vec<&str> {
    clause
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '"' | '(' | ')' | '[' | ']')))
        .filter(|t| !t.is_empty())
        .collect()
}

#[async_trait::async_trait]
impl ExtractionEngine for PatternEngine {
    async fn extract(&self, text: &str) -> Result<Vec<Extraction>> {
        Ok(self.extract_sync(text))
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

// ============================================================================
// Tests
// ============================================================================
