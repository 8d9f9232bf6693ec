pub static HOST: &str = "HOST";
pub static PORT: &str = "PORT";

// watson (default) or bedrock
pub static CLASSIFIER: &str = "CLASSIFIER";

pub static WATSON_URL: &str = "WATSON_URL";
pub static CHAT_MODEL: &str = "CHAT_MODEL";
