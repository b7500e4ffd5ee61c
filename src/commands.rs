use teloxide::utils::command::BotCommands;

#[derive(Debug, Clone, PartialEq, Eq, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "cancel adding or deleting a test.")]
    Cancel,
    #[command(description = "start the bot.")]
    Start,
}
