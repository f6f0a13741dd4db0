/// The closed set of actions a player (or script) can take against the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Open a session
    StartGame,
    /// Spend one ball
    LaunchBall,
    /// Spin the reel and evaluate the lottery
    CauseLottery,
    /// Launch a ball, then spin only if it landed in the start pocket.
    /// The landing decision is drawn once when the command is produced.
    LaunchBallFlow { triggers_lottery: bool },
    /// Close the session (the command loop itself keeps running)
    FinishGame,
}
