//! Per-entity conversion rule tables.
//!
//! Each entity kind the API returns declares its full rule table
//! explicitly — there is no inheritance or sharing between kinds, so
//! every declared rule is statically visible right here. A rule is a
//! pure `fn(Value) -> Value` keyed by the field name it rewrites.

use serde_json::Value;

use crate::time;

/// A pure field-conversion function.
pub type Rule = fn(Value) -> Value;

const ACCOUNT_RULES: &[(&str, Rule)] = &[
    ("createdAt", time::timestamp_from_millis),
    ("seenAt", time::timestamp_from_millis),
];

const USER_RULES: &[(&str, Rule)] = &[
    ("createdAt", time::timestamp_from_millis),
    ("seenAt", time::timestamp_from_millis),
];

const ACTIVITY_RULES: &[(&str, Rule)] = &[("interval", time::interval)];

const GAME_RULES: &[(&str, Rule)] = &[
    ("createdAt", time::timestamp_from_millis),
    ("lastMoveAt", time::timestamp_from_millis),
];

const GAME_STATE_RULES: &[(&str, Rule)] = &[
    ("createdAt", time::timestamp_from_millis),
    ("wtime", time::timestamp_from_millis),
    ("btime", time::timestamp_from_millis),
    ("winc", time::timestamp_from_millis),
    ("binc", time::timestamp_from_millis),
];

const RATING_HISTORY_RULES: &[(&str, Rule)] =
    &[("points", time::rating_history_points)];

/// The entity kinds whose records carry convertible fields.
///
/// Endpoints tag their requests with the entity their response decodes
/// to; the tag selects which rule table runs over the decoded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Account,
    User,
    Activity,
    Game,
    GameState,
    RatingHistory,
}

impl Entity {
    /// The full rule table for this entity kind.
    pub fn rules(self) -> &'static [(&'static str, Rule)] {
        match self {
            Entity::Account => ACCOUNT_RULES,
            Entity::User => USER_RULES,
            Entity::Activity => ACTIVITY_RULES,
            Entity::Game => GAME_RULES,
            Entity::GameState => GAME_STATE_RULES,
            Entity::RatingHistory => RATING_HISTORY_RULES,
        }
    }

    /// Converts a decoded payload: an array is converted element-wise
    /// in order, anything else goes through [`convert_one`] directly.
    ///
    /// [`convert_one`]: Entity::convert_one
    pub fn convert(self, data: Value) -> Value {
        match data {
            Value::Array(items) => Value::Array(
                items.into_iter().map(|v| self.convert_one(v)).collect(),
            ),
            other => self.convert_one(other),
        }
    }

    /// Converts a single record in place: every field that is both in
    /// the record and in the rule table is rewritten by its rule; all
    /// other fields are untouched. Non-object values pass through.
    pub fn convert_one(self, data: Value) -> Value {
        let Value::Object(mut map) = data else {
            return data;
        };
        for (key, rule) in self.rules() {
            if let Some(slot) = map.get_mut(*key) {
                let raw = slot.take();
                *slot = rule(raw);
            }
        }
        Value::Object(map)
    }

    /// Converts every value of a record through [`convert`], for
    /// responses keyed by category where each value is itself a record
    /// or list of records.
    ///
    /// [`convert`]: Entity::convert
    pub fn convert_values(self, data: Value) -> Value {
        let Value::Object(map) = data else {
            return data;
        };
        Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, self.convert(v)))
                .collect(),
        )
    }
}
