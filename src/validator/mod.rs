//! The validator: a pure function over a [`Save`] producing a typed
//! [`Report`]. Never mutates, never touches disk.

pub mod rules;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Clan, Faction, Fleet, Hero, Kingdom, Party, Quest, Save, Settlement, Ship};
use crate::id::{EntityId, TypeTag};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    /// Where in the graph the issue was found, e.g. `"hero-7"`.
    pub path: Option<String>,
    /// Extra machine-readable context, e.g. the offending value.
    pub context: Option<String>,
}

impl Issue {
    fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Issue {
        Issue {
            severity,
            code,
            message: message.into(),
            path: None,
            context: None,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Issue {
        Issue::new(Severity::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Issue {
        Issue::new(Severity::Warning, code, message)
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Issue {
        Issue::new(Severity::Info, code, message)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Issue {
        self.path = Some(path.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Issue {
        self.context = Some(context.into());
        self
    }
}

/// Controls which rules fire and how warnings are treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValidationMode {
    /// Evaluates `strict_only` rules in addition to the default set, and
    /// promotes every other rule's `Warning` issues to `Error`.
    Strict,
    #[default]
    Normal,
    /// Same rule set as `Normal`, but only `Error`-severity issues survive
    /// into the report.
    Permissive,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Report {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub info: Vec<Issue>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }
}

/// A borrowed reference to one entity, tagged by kind so rules registered
/// against a [`TypeTag`] can downcast via `match`.
pub enum Entity<'a> {
    Hero(&'a Hero),
    Party(&'a Party),
    Clan(&'a Clan),
    Kingdom(&'a Kingdom),
    Settlement(&'a Settlement),
    Faction(&'a Faction),
    Fleet(&'a Fleet),
    Ship(&'a Ship),
    Quest(&'a Quest),
}

impl Entity<'_> {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Entity::Hero(_) => TypeTag::Hero,
            Entity::Party(_) => TypeTag::Party,
            Entity::Clan(_) => TypeTag::Clan,
            Entity::Kingdom(_) => TypeTag::Kingdom,
            Entity::Settlement(_) => TypeTag::Settlement,
            Entity::Faction(_) => TypeTag::Faction,
            Entity::Fleet(_) => TypeTag::Fleet,
            Entity::Ship(_) => TypeTag::Ship,
            Entity::Quest(_) => TypeTag::Quest,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::Hero(e) => e.id,
            Entity::Party(e) => e.id,
            Entity::Clan(e) => e.id,
            Entity::Kingdom(e) => e.id,
            Entity::Settlement(e) => e.id,
            Entity::Faction(e) => e.id,
            Entity::Fleet(e) => e.id,
            Entity::Ship(e) => e.id,
            Entity::Quest(e) => e.id,
        }
    }
}

/// Carries the owning [`Save`] and a per-[`EntityId`] existence cache so
/// cross-entity checks (dangling references) don't repeatedly walk the
/// graph's maps.
pub struct ValidationContext<'a> {
    pub save: &'a Save,
    pub mode: ValidationMode,
    cache: std::cell::RefCell<HashMap<EntityId, bool>>,
}

impl<'a> ValidationContext<'a> {
    fn new(save: &'a Save, mode: ValidationMode) -> ValidationContext<'a> {
        ValidationContext {
            save,
            mode,
            cache: std::cell::RefCell::new(HashMap::new()),
        }
    }

    /// Whether `id` resolves to some entity in the owning save (any type),
    /// or is the empty sentinel (treated as "not a reference").
    pub fn exists(&self, id: EntityId) -> bool {
        if id.is_empty() {
            return true;
        }
        if let Some(&known) = self.cache.borrow().get(&id) {
            return known;
        }
        let found = match id.type_tag() {
            Some(TypeTag::Hero) => self.save.heroes.contains_key(&id),
            Some(TypeTag::Party) => self.save.parties.contains_key(&id),
            Some(TypeTag::Clan) => self.save.clans.contains_key(&id),
            Some(TypeTag::Kingdom) => self.save.kingdoms.contains_key(&id),
            Some(TypeTag::Settlement) => self.save.settlements.contains_key(&id),
            Some(TypeTag::Faction) => self.save.factions.contains_key(&id),
            Some(TypeTag::Fleet) => self.save.fleets.contains_key(&id),
            Some(TypeTag::Ship) => self.save.ships.contains_key(&id),
            Some(TypeTag::Quest) => self.save.quests.contains_key(&id),
            None => false,
        };
        self.cache.borrow_mut().insert(id, found);
        found
    }
}

type Rule = Box<dyn Fn(&Entity, &ValidationContext) -> Vec<Issue> + Send + Sync>;

/// A registry of rule functions keyed by [`TypeTag`], in registration order,
/// so mod-specific rules can be layered on without touching the built-in
/// set. [`Validator::default`] populates the built-in rules.
pub struct Validator {
    by_tag: HashMap<TypeTag, Vec<Rule>>,
    strict_only: HashMap<TypeTag, Vec<Rule>>,
}

impl Validator {
    pub fn empty() -> Validator {
        Validator {
            by_tag: HashMap::new(),
            strict_only: HashMap::new(),
        }
    }

    /// Registers a rule that runs in every mode.
    pub fn register<F>(&mut self, tag: TypeTag, rule: F)
    where
        F: Fn(&Entity, &ValidationContext) -> Vec<Issue> + Send + Sync + 'static,
    {
        self.by_tag.entry(tag).or_default().push(Box::new(rule));
    }

    /// Registers a rule that only runs under [`ValidationMode::Strict`]
    /// (e.g. `HERO_ATTR_002`).
    pub fn register_strict_only<F>(&mut self, tag: TypeTag, rule: F)
    where
        F: Fn(&Entity, &ValidationContext) -> Vec<Issue> + Send + Sync + 'static,
    {
        self.strict_only
            .entry(tag)
            .or_default()
            .push(Box::new(rule));
    }

    /// Runs every registered rule over every entity in `save`, plus the
    /// header checks and dangling-reference checks, and returns the
    /// composed [`Report`].
    pub fn validate(&self, save: &Save, mode: ValidationMode) -> Report {
        let ctx = ValidationContext::new(save, mode);
        let mut report = Report::default();

        for issue in rules::header::check(&save.header) {
            self.finish_and_push(&mut report, issue, mode, false);
        }

        macro_rules! run_collection {
            ($collection:expr, $wrap:expr) => {
                for entity in $collection {
                    let wrapped = $wrap(entity);
                    let tag = wrapped.type_tag();
                    for rule in self.by_tag.get(&tag).into_iter().flatten() {
                        for issue in rule(&wrapped, &ctx) {
                            self.finish_and_push(&mut report, issue, mode, false);
                        }
                    }
                    if mode == ValidationMode::Strict {
                        for rule in self.strict_only.get(&tag).into_iter().flatten() {
                            for issue in rule(&wrapped, &ctx) {
                                self.finish_and_push(&mut report, issue, mode, true);
                            }
                        }
                    }
                }
            };
        }

        run_collection!(save.heroes.values(), Entity::Hero);
        run_collection!(save.parties.values(), Entity::Party);
        run_collection!(save.clans.values(), Entity::Clan);
        run_collection!(save.kingdoms.values(), Entity::Kingdom);
        run_collection!(save.settlements.values(), Entity::Settlement);
        run_collection!(save.factions.values(), Entity::Faction);
        run_collection!(save.fleets.values(), Entity::Fleet);
        run_collection!(save.ships.values(), Entity::Ship);
        run_collection!(save.quests.values(), Entity::Quest);

        report
    }

    /// Applies the mode's escalation/filtering policy to one issue before
    /// adding it to `report`: `Strict` promotes `Warning` to `Error`, except
    /// for issues from a `strict_only` rule (the table pins those to
    /// `Warning` even under `Strict`, e.g. `HERO_ATTR_002`); `Permissive`
    /// drops everything but `Error`.
    fn finish_and_push(
        &self,
        report: &mut Report,
        mut issue: Issue,
        mode: ValidationMode,
        from_strict_only_rule: bool,
    ) {
        if mode == ValidationMode::Strict
            && !from_strict_only_rule
            && issue.severity == Severity::Warning
        {
            issue.severity = Severity::Error;
        }
        if mode == ValidationMode::Permissive && issue.severity != Severity::Error {
            return;
        }
        report.push(issue);
    }
}

impl Default for Validator {
    fn default() -> Validator {
        let mut validator = Validator::empty();
        rules::register_builtin_rules(&mut validator);
        validator
    }
}

/// Convenience entry point: builds the default [`Validator`] and runs it.
pub fn validate(save: &Save, mode: ValidationMode) -> Report {
    Validator::default().validate(save, mode)
}
