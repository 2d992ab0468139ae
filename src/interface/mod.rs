pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_assessment_csv;
pub use prompts::{
    compose_selections, fuzzy_candidates, prompt_ingredient, prompt_note, prompt_value,
    prompt_yes_no,
};
pub use render::{
    display_assessment, display_ingredient_list, display_verdict, display_verdict_line,
    write_assessment,
};
