use locale::Variables;
use uuid::Uuid;

/// Who ran a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender<'a> {
    Console,
    Player { name: &'a str, uuid: Uuid },
}

impl Sender<'_> {
    pub fn name(&self) -> &str {
        match self {
            Sender::Console => "Console",
            Sender::Player { name, .. } => name,
        }
    }
}

/// Standard placeholder variables for a command invocation.
///
/// Always sets `command` and `sender`; player senders also get `player` and `uuid`.
pub fn command_variables(command: &str, sender: Sender<'_>) -> Variables {
    let mut variables = Variables::new()
        .with("command", command)
        .with("sender", sender.name());

    if let Sender::Player { name, uuid } = sender {
        variables.insert("player", name);
        variables.insert("uuid", uuid.to_string());
    }

    variables
}
