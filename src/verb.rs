//! Verbal predications: a verb stem plus the tense, aspect, voice and
//! polarity needed to re-inflect it, and the argument slots of its category.

use std::collections::VecDeque;

use layered_ccg::categories::{
    ADJECTIVAL_VP, INVERTED_REPORTING_VERB, NP, S_DCL, VERB_PHRASE, VP_MODIFIER,
    VP_MODIFIER_EITHER,
};
use layered_ccg::{Category, Slash};

use crate::inflection::inflections;
use crate::lexicon::{
    is_auxiliary_verb, is_copula_verb, is_future_tense, is_modal, is_negation_word,
    is_preposition_word, normalized_modal,
};
use crate::noun::{Noun, Number, Person};
use crate::predication::{ensure_realizable, first_binding, place_words, prepend, ArgMap, Args};
use crate::utils::{permute_arg_map, permute_category_args};
use crate::{PredicateCache, Predication, PredicationError, PredicationResult};

/// What is needed to reproduce the verb group, not a linguistic tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    /// No finite marking: "eat", "eaten", "eating" as selected by voice and aspect.
    BareVerb,
    /// "to eat"
    To,
    /// "might eat"; requires a modal word.
    Modal,
    /// Stem without a tense auxiliary; takes "do" support when split.
    Bare,
    Past,
    Present,
    /// "will eat"
    Future,
}

/// Mutually exclusive verb forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    Active,
    Passive,
    Adjective,
}

/// Everything about a verb group besides its predicate and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbForm {
    pub tense: Tense,
    /// Present iff `tense` is [`Tense::Modal`].
    pub modal: Option<String>,
    pub voice: Voice,
    pub perfect: bool,
    pub progressive: bool,
    pub negated: bool,
    /// A particle read from the adverb right after the verb ("showed him up").
    pub particle: Option<String>,
}

impl Default for VerbForm {
    fn default() -> Self {
        VerbForm {
            tense: Tense::BareVerb,
            modal: None,
            voice: Voice::Active,
            perfect: false,
            progressive: false,
            negated: false,
            particle: None,
        }
    }
}

impl VerbForm {
    pub fn with_tense(tense: Tense) -> Self {
        VerbForm {
            tense,
            ..VerbForm::default()
        }
    }
}

/// Question order for a verb: the auxiliary moved in front of the subject,
/// the subject, then the rest of the verb group and internal arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionWords {
    pub auxiliary: Vec<String>,
    pub subject: Vec<String>,
    pub body: Vec<String>,
}

impl QuestionWords {
    pub fn words(&self) -> Vec<String> {
        self.auxiliary
            .iter()
            .chain(&self.subject)
            .chain(&self.body)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verb {
    predicate: String,
    category: Category,
    args: Args,
    form: VerbForm,
}

impl Verb {
    pub fn new(
        predicate: impl Into<String>,
        category: Category,
        args: Args,
        form: VerbForm,
    ) -> PredicationResult<Self> {
        let verb = Verb {
            predicate: predicate.into(),
            category,
            args,
            form,
        };
        verb.validate()?;
        Ok(verb)
    }

    fn validate(&self) -> PredicationResult<()> {
        if !self.category.is_function_into(&VERB_PHRASE) || self.category.is_function_into(&VP_MODIFIER) {
            return Err(PredicationError::invalid(format!(
                "{:?} ({}) is not a verb category",
                self.predicate, self.category
            )));
        }
        if (self.form.tense == Tense::Modal) != self.form.modal.is_some() {
            return Err(PredicationError::invalid(
                "a modal word is required exactly when the tense is modal",
            ));
        }
        let subjects = self.args.get().get(&1).map(Vec::as_slice).unwrap_or(&[]);
        for subject in subjects {
            let valid = match subject.predication() {
                Predication::Noun(_) => true,
                Predication::Gap(gap) => NP.matches(gap.category()),
                _ => false,
            };
            if !valid {
                return Err(PredicationError::invalid(format!(
                    "subject of {:?} must be a noun",
                    self.predicate
                )));
            }
        }
        Ok(())
    }

    /// Reads the verb group headed at `index`. An auxiliary head is shifted
    /// forward to the main verb it supports.
    pub fn from_parse(index: usize, cache: &mut PredicateCache<'_>) -> PredicationResult<Self> {
        let parse = cache.parse();
        let words = parse.words();
        let categories = parse.categories();
        if index >= words.len() {
            return Err(PredicationError::invalid(format!(
                "token {} is outside a sentence of {} words",
                index,
                words.len()
            )));
        }

        let mut head = index;
        if is_auxiliary_verb(&words[index], &categories[index]) {
            while head + 1 < words.len()
                && (is_auxiliary_verb(&words[head], &categories[head])
                    || categories[head].is_function_into(&VP_MODIFIER_EITHER)
                    || is_negation_word(&words[head]))
            {
                head += 1;
            }
            while head > index
                && ((!categories[head].is_function_into(&VERB_PHRASE)
                    && !INVERTED_REPORTING_VERB.matches(&categories[head]))
                    || categories[head].is_function_into(&VP_MODIFIER_EITHER))
            {
                head -= 1;
            }
        }

        let initial_category = categories[head].clone();
        let initial_args = cache.extract_args(head, &initial_category);

        // "...", said the man.
        let (category, args) = if INVERTED_REPORTING_VERB.matches(&initial_category) {
            let subject_category = initial_category
                .argument(2)
                .cloned()
                .unwrap_or_else(|| NP.clone());
            let category = Category::functor(
                Category::functor(S_DCL.clone(), Slash::Backward, subject_category),
                Slash::Forward,
                S_DCL.clone(),
            );
            let swap = |slot: usize| match slot {
                1 => 2,
                2 => 1,
                other => other,
            };
            (category, permute_arg_map(&initial_args, swap))
        } else {
            (initial_category, initial_args)
        };

        let predicate = if category.is_function_into(&ADJECTIVAL_VP) {
            words[head].clone()
        } else {
            inflections().stem(&words[head])
        };

        if !category.is_function_into(&VERB_PHRASE) {
            return Err(PredicationError::invalid(format!(
                "{:?} ({}) is not a verb",
                predicate, category
            )));
        }

        let mut form = VerbForm::default();
        if head + 1 < words.len()
            && VP_MODIFIER.matches(&categories[head + 1])
            && !is_negation_word(&words[head + 1])
            && is_preposition_word(&words[head + 1])
        {
            form.particle = Some(words[head + 1].clone());
        }
        read_auxiliaries(words, categories, head, &category, &mut form);

        Verb::new(predicate, category, Args::resolved(args), form)
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn args(&self) -> &ArgMap {
        self.args.get()
    }

    pub fn form(&self) -> &VerbForm {
        &self.form
    }

    pub fn tense(&self) -> Tense {
        self.form.tense
    }

    pub fn modal(&self) -> Option<&str> {
        self.form.modal.as_deref()
    }

    pub fn voice(&self) -> Voice {
        self.form.voice
    }

    pub fn is_perfect(&self) -> bool {
        self.form.perfect
    }

    pub fn is_progressive(&self) -> bool {
        self.form.progressive
    }

    pub fn is_negated(&self) -> bool {
        self.form.negated
    }

    pub fn particle(&self) -> Option<&str> {
        self.form.particle.as_deref()
    }

    pub fn is_copular(&self) -> bool {
        self.predicate == "be"
    }

    /// The first filler of slot 1, when it is a noun.
    pub fn subject(&self) -> Option<&Noun> {
        self.args()
            .get(&1)
            .and_then(|fillers| fillers.first())
            .and_then(|argument| argument.predication().as_noun())
    }

    fn with_form(&self, form: VerbForm) -> PredicationResult<Verb> {
        Verb::new(self.predicate.clone(), self.category.clone(), self.args.clone(), form)
    }

    /// Use [`Verb::with_modal`] for modal tense.
    pub fn with_tense(&self, tense: Tense) -> PredicationResult<Verb> {
        if tense == Tense::Modal {
            return Err(PredicationError::invalid("modal tense needs a modal word; use with_modal"));
        }
        self.with_form(VerbForm {
            tense,
            modal: None,
            ..self.form.clone()
        })
    }

    pub fn with_modal(&self, modal: impl Into<String>) -> PredicationResult<Verb> {
        self.with_form(VerbForm {
            tense: Tense::Modal,
            modal: Some(modal.into()),
            ..self.form.clone()
        })
    }

    pub fn with_perfect(&self, perfect: bool) -> PredicationResult<Verb> {
        self.with_form(VerbForm {
            perfect,
            ..self.form.clone()
        })
    }

    pub fn with_progressive(&self, progressive: bool) -> PredicationResult<Verb> {
        self.with_form(VerbForm {
            progressive,
            ..self.form.clone()
        })
    }

    pub fn with_negation(&self, negated: bool) -> PredicationResult<Verb> {
        self.with_form(VerbForm {
            negated,
            ..self.form.clone()
        })
    }

    /// Reorders argument slots; `permutation(new_slot)` names the old slot.
    pub fn permute_args(&self, permutation: impl Fn(usize) -> usize) -> PredicationResult<Verb> {
        let category = permute_category_args(&self.category, &permutation)?;
        let args = permute_arg_map(self.args(), &permutation);
        Verb::new(self.predicate.clone(), category, Args::resolved(args), self.form.clone())
    }

    pub(crate) fn with_args(&self, args: ArgMap) -> PredicationResult<Verb> {
        Verb::new(self.predicate.clone(), self.category.clone(), Args::resolved(args), self.form.clone())
    }

    fn agreement(&self) -> (Option<Number>, Person) {
        match self.subject() {
            Some(subject) => (subject.number(), subject.person()),
            None => (None, Person::Third),
        }
    }

    /// The verb group from its first auxiliary to the main verb.
    fn word_stack(&self) -> VecDeque<String> {
        let dictionary = inflections();
        let mut stack = VecDeque::new();

        if self.form.tense == Tense::BareVerb {
            let word = match self.form.voice {
                Voice::Passive => dictionary.past_participle(&self.predicate),
                Voice::Adjective => self.predicate.clone(),
                Voice::Active if self.form.perfect => dictionary.past_participle(&self.predicate),
                Voice::Active if self.form.progressive => {
                    dictionary.present_participle(&self.predicate)
                }
                Voice::Active => self.predicate.clone(),
            };
            stack.push_front(word);
            return stack;
        }

        stack.push_front(self.predicate.clone());

        // Progressive is dropped for passives and adjectives ("would be being used").
        match self.form.voice {
            Voice::Adjective | Voice::Passive => {
                if self.form.voice == Voice::Passive {
                    replace_top(&mut stack, |top| dictionary.past_participle(top));
                }
                stack.push_front("be".to_string());
            }
            Voice::Active if self.form.progressive => {
                replace_top(&mut stack, |top| dictionary.present_participle(top));
                stack.push_front("be".to_string());
            }
            Voice::Active => {}
        }

        if self.form.perfect {
            replace_top(&mut stack, |top| dictionary.past_participle(top));
            stack.push_front("have".to_string());
        }

        let (number, person) = self.agreement();
        match self.form.tense {
            Tense::Bare | Tense::BareVerb => {}
            Tense::To => stack.push_front("to".to_string()),
            Tense::Modal => {
                if let Some(modal) = &self.form.modal {
                    stack.push_front(modal.clone());
                }
            }
            Tense::Past => replace_top(&mut stack, |top| dictionary.past_tense(top, number, person)),
            Tense::Present => {
                replace_top(&mut stack, |top| dictionary.present_tense(top, number, person))
            }
            Tense::Future => stack.push_front("will".to_string()),
        }

        if self.form.negated {
            if stack.len() == 1 {
                self.split_verb(&mut stack);
            }
            if let Some(top) = stack.pop_front() {
                stack.push_front("not".to_string());
                stack.push_front(top);
            }
        }
        stack
    }

    /// A lone verb becomes do-support plus stem ("ate" → "did eat"). A lone
    /// copula is left whole so it can move as a unit.
    fn split_verb(&self, stack: &mut VecDeque<String>) {
        if stack.len() == 1 && stack.front().map_or(false, |word| is_copula_verb(word)) {
            return;
        }
        let dictionary = inflections();
        let (number, person) = self.agreement();
        replace_top(stack, |top| dictionary.stem(top));
        let support = match self.form.tense {
            Tense::Past => dictionary.past_tense("do", number, person),
            Tense::Present => dictionary.present_tense("do", number, person),
            _ => "do".to_string(),
        };
        stack.push_front(support);
    }

    fn word_stack_with_split(&self) -> VecDeque<String> {
        let mut stack = self.word_stack();
        if stack.len() == 1 {
            self.split_verb(&mut stack);
        }
        stack
    }

    /// Auxiliaries go in front of the verb once only the subject slot is
    /// left; a particle follows its first consumed argument when that is a
    /// pronoun or expletive and precedes it otherwise.
    pub fn phrase(&self, desired: &Category) -> PredicationResult<Vec<String>> {
        ensure_realizable(&self.predicate, &self.category, desired)?;
        let args = self.args();

        let mut all_words = self.word_stack();
        let verb_words: Vec<String> = all_words.pop_back().into_iter().collect();
        let aux_chain: Vec<String> = all_words.into_iter().collect();

        let mut left: Vec<String> = Vec::new();
        let mut right: Vec<String> = Vec::new();
        let mut current = &self.category;

        if let Some(particle) = &self.form.particle {
            if desired.drop_features().matches(current) {
                right.push(particle.clone());
            }
        }
        if VERB_PHRASE.matches(current) {
            prepend(&mut left, aux_chain.iter().cloned());
        }

        let mut first = true;
        while current.arity() > desired.arity() {
            let (inner, slash, argument_category) = match current {
                Category::Functor { left, slash, right } => (left.as_ref(), *slash, right.as_ref()),
                Category::Atomic { .. } => break,
            };
            let argument = first_binding(&self.predicate, args, current.arity())?;
            let words = argument.predication().phrase(argument_category)?;
            place_words(&mut left, &mut right, slash, words);
            if first {
                self.place_particle(&mut right, argument.predication());
                first = false;
            }
            current = inner;
            if VERB_PHRASE.matches(current) {
                prepend(&mut left, aux_chain.iter().cloned());
            }
        }

        left.extend(verb_words);
        left.extend(right);
        Ok(left)
    }

    fn place_particle(&self, right: &mut Vec<String>, first_argument: &Predication) {
        if let Some(particle) = &self.form.particle {
            let light = first_argument
                .as_noun()
                .map_or(false, |noun| noun.is_pronoun() || noun.is_expletive());
            if light {
                right.push(particle.clone());
            } else {
                right.insert(0, particle.clone());
            }
        }
    }

    /// Subject-auxiliary inverted order. The first auxiliary (or do-support
    /// split off a bare verb) moves in front of the subject, unless the
    /// subject renders as nothing.
    pub fn question_words(&self) -> PredicationResult<QuestionWords> {
        let args = self.args();
        let mut left: Vec<String> = Vec::new();
        let mut right: Vec<String> = Vec::new();
        let mut current = &self.category;

        if let Some(particle) = &self.form.particle {
            if VERB_PHRASE.matches(current) {
                right.push(particle.clone());
            }
        }

        let mut first = true;
        while current.arity() > 1 {
            let (inner, slash, argument_category) = match current {
                Category::Functor { left, slash, right } => (left.as_ref(), *slash, right.as_ref()),
                Category::Atomic { .. } => break,
            };
            let argument = first_binding(&self.predicate, args, current.arity())?;
            let words = argument.predication().phrase(argument_category)?;
            place_words(&mut left, &mut right, slash, words);
            if first {
                self.place_particle(&mut right, argument.predication());
                first = false;
            }
            current = inner;
        }

        let subject = first_binding(&self.predicate, args, 1)?;
        let subject_category = self.category.argument(1).unwrap_or(&*NP);
        let subject_words = subject.predication().phrase(subject_category)?;

        let (auxiliary, subject_words, mut body) = if subject_words.is_empty() {
            let mut stack = self.word_stack();
            let verb_words: Vec<String> = stack.pop_back().into_iter().collect();
            let mut body = left;
            body.extend(verb_words);
            (stack.into_iter().collect(), Vec::new(), body)
        } else {
            let mut stack = self.word_stack_with_split();
            let flipped: Vec<String> = stack.pop_front().into_iter().collect();
            // A flipped copula leaves no verb behind.
            let verb_words: Vec<String> = stack.pop_back().into_iter().collect();
            let mut body: Vec<String> = stack.into_iter().collect();
            body.extend(left);
            body.extend(verb_words);
            (flipped, subject_words, body)
        };
        body.extend(right);

        Ok(QuestionWords {
            auxiliary,
            subject: subject_words,
            body,
        })
    }
}

fn replace_top(stack: &mut VecDeque<String>, f: impl FnOnce(&str) -> String) {
    if let Some(top) = stack.pop_front() {
        stack.push_front(f(&top));
    }
}

/// Walks left from the main verb through its auxiliaries, reading tense,
/// aspect, voice and negation off their categories.
fn read_auxiliaries(
    words: &[String],
    categories: &[Category],
    head: usize,
    head_category: &Category,
    form: &mut VerbForm,
) {
    let dictionary = inflections();
    let vp_with = |feature: &str| {
        Category::functor(Category::with_feature("S", feature), Slash::Backward, NP.clone())
    };
    let passive = vp_with("pss");
    let bare = vp_with("b");
    let to = vp_with("to");
    let perfect = vp_with("pt");
    let progressive = vp_with("ng");
    let declarative = vp_with("dcl");

    for index in (0..=head).rev() {
        let word = words[index].to_lowercase();
        // the head may have been re-read as an ordinary verb
        let category = if index == head { head_category } else { &categories[index] };

        // Negation follows a copula; "no" there is more likely a determiner.
        if index == head && is_copula_verb(&word) {
            if let Some(next) = words.get(index + 1) {
                if is_negation_word(next) && !next.eq_ignore_ascii_case("no") {
                    form.negated = true;
                }
            }
        }

        let auxiliary = is_auxiliary_verb(&word, category);
        let negation = is_negation_word(&word);
        let modifier = category.is_function_into(&VP_MODIFIER_EITHER);

        if !auxiliary && !negation && modifier {
            // adverbs between auxiliaries
            continue;
        } else if category.is_function_into(&VERB_PHRASE)
            && !modifier
            && !auxiliary
            && !negation
            && index != head
        {
            // another verb, e.g. "possible to win"
            break;
        } else if negation {
            form.negated = true;
        } else if category.is_function_into(&ADJECTIVAL_VP) {
            form.voice = Voice::Adjective;
            form.tense = Tense::BareVerb;
        } else if category.is_function_into(&passive) {
            form.voice = Voice::Passive;
            form.tense = Tense::BareVerb;
        } else if category.is_function_into(&bare) {
            form.tense = Tense::BareVerb;
        } else if category.is_function_into(&to) {
            form.tense = Tense::To;
        } else if category.is_function_into(&perfect) {
            form.perfect = true;
            form.tense = Tense::BareVerb;
        } else if category.is_function_into(&progressive) {
            form.progressive = true;
            form.tense = Tense::BareVerb;
        } else if category.is_function_into(&declarative) {
            if is_modal(&word) {
                form.tense = Tense::Modal;
                form.modal = Some(normalized_modal(&word));
            } else if is_future_tense(&word) {
                form.tense = Tense::Future;
            } else if dictionary.is_past_tense(&word) {
                form.tense = Tense::Past;
            } else if dictionary.is_present_tense(&word) {
                form.tense = Tense::Present;
            } else {
                break;
            }
        } else {
            break;
        }
    }

    if form.tense != Tense::Modal {
        form.modal = None;
    }
}
