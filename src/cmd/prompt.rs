use llm_sim::prompt::SYSTEM_INSTRUCTION;

pub fn cmd_prompt() {
    println!("{}", SYSTEM_INSTRUCTION);
}
