//! Chore display model

use tabled::Tabled;

use homeboard::chores::ChoreInstance;

/// One chore row
#[derive(Debug, Clone, Tabled)]
pub struct ChoreDisplay {
    #[tabled(rename = "DONE")]
    pub done: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CHORE")]
    pub text: String,

    #[tabled(rename = "EVERY")]
    pub frequency: String,
}

impl From<&ChoreInstance> for ChoreDisplay {
    fn from(instance: &ChoreInstance) -> Self {
        Self {
            done: if instance.completed {
                "\u{2713}".to_string() // checkmark
            } else {
                String::new()
            },
            id: instance.chore.id.clone(),
            text: instance.chore.text.clone(),
            frequency: instance.chore.frequency.to_string(),
        }
    }
}
