//! String constants the API accepts in paths, query strings, and form
//! bodies.
//!
//! Each enum is a closed set of spellings the service understands;
//! `as_str` gives the exact wire spelling, and `Display` delegates to
//! it so the values drop straight into path formatting.

use std::fmt;

/// A speed or variant bucket used for ratings and leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerfType {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    Chess960,
    Crazyhouse,
    Antichess,
    Atomic,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl PerfType {
    /// The spelling the API expects on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PerfType::UltraBullet => "ultraBullet",
            PerfType::Bullet => "bullet",
            PerfType::Blitz => "blitz",
            PerfType::Rapid => "rapid",
            PerfType::Classical => "classical",
            PerfType::Correspondence => "correspondence",
            PerfType::Chess960 => "chess960",
            PerfType::Crazyhouse => "crazyhouse",
            PerfType::Antichess => "antichess",
            PerfType::Atomic => "atomic",
            PerfType::Horde => "horde",
            PerfType::KingOfTheHill => "kingOfTheHill",
            PerfType::RacingKings => "racingKings",
            PerfType::ThreeCheck => "threeCheck",
        }
    }
}

impl fmt::Display for PerfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game variant selectable when seeking a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Standard,
    Chess960,
    Crazyhouse,
    Antichess,
    Atomic,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl Variant {
    /// The spelling the API expects on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Chess960 => "chess960",
            Variant::Crazyhouse => "crazyhouse",
            Variant::Antichess => "antichess",
            Variant::Atomic => "atomic",
            Variant::Horde => "horde",
            Variant::KingOfTheHill => "kingOfTheHill",
            Variant::RacingKings => "racingKings",
            Variant::ThreeCheck => "threeCheck",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The spelling the API expects on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chat room attached to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Player,
    Spectator,
}

impl Room {
    /// The spelling the API expects on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Room::Player => "player",
            Room::Spectator => "spectator",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a game affects ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Casual,
    Rated,
}

impl Mode {
    /// The spelling the API expects on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Casual => "casual",
            Mode::Rated => "rated",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
