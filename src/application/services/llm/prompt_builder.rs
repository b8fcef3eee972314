//! Prompt building functions for the generation pipeline

/// Prompt for the story background that seeds every card
pub fn build_story_prompt(theme: &str, style: &str) -> String {
    format!(
        "Generate a 100-word D&D-style story background for a board game. \
         Include a setting, a central artifact, and a looming threat.\n\
         Theme: {theme}\n\
         Style: {style}\n\
         Respond with JSON only, in the form: {{\"story_background\": \"<story>\"}}"
    )
}

/// Prompt for the playable character cards
pub fn build_role_prompt(count: usize, story: &str) -> String {
    let mut prompt = format!(
        "Generate {count} D&D-style playable characters for a board game set in this story:\n\
         {story}\n\n"
    );
    prompt.push_str(
        "Respond with a JSON array. Each element must be an object with:\n\
         - \"name\": string (e.g. \"Aragorn\")\n\
         - \"description\": string (50-word background naming a profession such as Warrior or Mage \
         and the attributes Strength, Dexterity and Wisdom, each from 1 to 5)\n\
         - \"effect\": string (1-2 skills, e.g. \"Fireball: 3 MP, D6+2 damage; Heal: 2 MP, restore 5 HP\")\n\
         Example element:\n\
         {\"name\": \"Aragorn\", \"description\": \"Aragorn, a skilled Warrior. Strength: 4, Dexterity: 3, \
         Wisdom: 2. A lone wanderer seeking an ancient artifact to defeat a dark lord.\", \
         \"effect\": \"Sword Strike: D20+4 >= 15, D6+3 damage\"}",
    );
    prompt
}

/// Prompt for the event and item cards
pub fn build_event_prompt(count: usize, story: &str) -> String {
    let mut prompt = format!(
        "Generate {count} D&D-style event cards for a board game set in this story:\n\
         {story}\n\n"
    );
    prompt.push_str(
        "Each card is a combat, plot or item card. Start every description with its kind: \
         \"Combat event:\", \"Plot event:\" or \"Item event:\".\n\
         Respond with a JSON array. Each element must be an object with:\n\
         - \"name\": string (e.g. \"Dragon Attack\")\n\
         - \"description\": string (50-word description tied to the story)\n\
         - \"effect\": string (e.g. \"Combat: HP 10, Attack D6+1\" or \"Plot: Gain 1 Plot Point\")\n\
         Example element:\n\
         {\"name\": \"Dragon Attack\", \"description\": \"Combat event: A fire-breathing dragon assaults \
         the village, demanding tribute.\", \"effect\": \"Combat: HP 10, Attack D6+1\"}",
    );
    prompt
}
