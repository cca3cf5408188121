// Ability scores
pub const BASE_ABILITY_SCORE: i32 = 10;
pub const MIN_ABILITY_SCORE: i32 = 1;
pub const MAX_ABILITY_SCORE: i32 = 30;
pub const NUM_ABILITIES: usize = 6;

// Character levels
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;
pub const BASE_PROFICIENCY_BONUS: i32 = 2;
pub const LEVELS_PER_PROFICIENCY_STEP: i32 = 4;

// Minimum cumulative XP for levels 1..=20 (index = level - 1)
pub const XP_THRESHOLDS: [u32; 20] = [
    0,       // Level 1
    300,     // Level 2
    900,     // Level 3
    2_700,   // Level 4
    6_500,   // Level 5
    14_000,  // Level 6
    23_000,  // Level 7
    34_000,  // Level 8
    48_000,  // Level 9
    64_000,  // Level 10
    85_000,  // Level 11
    100_000, // Level 12
    120_000, // Level 13
    140_000, // Level 14
    165_000, // Level 15
    195_000, // Level 16
    225_000, // Level 17
    265_000, // Level 18
    305_000, // Level 19
    355_000, // Level 20
];

// Spellcasting
pub const SPELL_SAVE_DC_BASE: i32 = 8;
pub const MAX_SPELL_LEVEL: u8 = 9;
pub const DEFAULT_TARGET_SAVE_BONUS: i32 = 2;

// d20 checks
pub const D20_SIDES: u32 = 20;
pub const NATURAL_CRIT: u32 = 20;
pub const NATURAL_FUMBLE: u32 = 1;

// Dice
pub const SUPPORTED_DIE_SIDES: [u32; 6] = [4, 6, 8, 10, 12, 20];
pub const MAX_DICE_COUNT: u32 = 100;
pub const MAX_DICE_MODIFIER: i32 = 1000;

// Armor class
pub const UNARMORED_AC: i32 = 10;
pub const SHIELD_AC_BONUS: i32 = 2;
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;

// Persistence
pub const CHARACTERS_DIR: &str = "characters";
pub const CAMPAIGNS_DIR: &str = "campaigns";
pub const SPELLS_DIR: &str = "spells";
pub const SPELLS_FILE: &str = "spells.json";
pub const ITEMS_DIR: &str = "items";
