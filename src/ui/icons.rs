//! Shared UI icons and emojis.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");

// Simulation stages
pub static BRAIN: Emoji<'_, '_> = Emoji("🧠 ", "");
pub static LEXICAL: Emoji<'_, '_> = Emoji("🔤 ", "[T]");
pub static LAYERS: Emoji<'_, '_> = Emoji("🧩 ", "[C]");
pub static ATTENTION: Emoji<'_, '_> = Emoji("🔍 ", "[R]");
