pub mod tools;
pub mod emotion_scores_tool;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{SpecificToolChoice, ToolChoice};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, Message, SystemContentBlock, Tool, ToolConfiguration, ToolInputSchema, ToolSpecification, ConversationRole::User};
use aws_sdk_bedrockruntime::operation::converse::ConverseOutput;
use emotion_scores_tool::get_emotion_scores_tool_definition;

use tools::ToValue;
use super::common_structs::EmotionScores;
use super::EmotionClassifier;


#[derive(Debug, Clone)]
pub struct BedrockService {
    client: Client,
    chat_model_id: String,
}

impl BedrockService {
    pub fn new(client: &Client, chat_model_id: &str) -> Self {
        Self {
            client: client.to_owned(),
            chat_model_id: chat_model_id.to_owned(),
        }
    }

    pub async fn get_emotion_scores(&self, text: &str) -> Result<Option<EmotionScores>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let tool_definition = get_emotion_scores_tool_definition();
        let emotion_scores_tool = Tool::ToolSpec(
            ToolSpecification::builder()
                .name(&tool_definition.name)
                .description(&tool_definition.description)
                .input_schema(ToolInputSchema::Json(tool_definition.schema))
                .build()?
        );

        let tool_config = ToolConfiguration::builder()
            .set_tools(Some(vec![emotion_scores_tool]))
            .tool_choice(ToolChoice::Tool(SpecificToolChoice::builder().name(&tool_definition.name).build()?))
            .build()?;

        let system_prompt = format!("
            You will be acting as an AI Empath.
            You are an expert at reading the emotions within a short statement.
            The target text will be surrounded by <text></text>.
            Score anger, disgust, fear, joy and sadness, each from 0.0 to 1.0.
            You have to use {} to print out the score for each emotion.
        ", tool_definition.name);

        let message = Message::builder()
            .role(User)
            .content(ContentBlock::Text(format!("<text>{}</text>", text)))
            .build()?;

        let response = self.send(&system_prompt, vec![message], tool_config).await?;

        tracing::debug!(?response, "bedrock converse response");
        self.process_emotion_score_output(response, &tool_definition.name).map(Some)
    }


    fn process_emotion_score_output(&self, response: ConverseOutput, tool_name: &str) -> Result<EmotionScores> {
        let output = response.output.context("Error getting output")?;
        let message = match output.as_message() {
            Ok(message) => message,
            Err(output) => {
                bail!("Converse output is not message: {:?}", output)
            },
        };
        emotion_scores_from_message(message, tool_name)
    }


    async fn send(&self, system_prompt: &str, messages: Vec<Message>, tool_config: ToolConfiguration) -> Result<ConverseOutput> {
        let response = self.client
            .converse()
            .model_id(&self.chat_model_id)
            .system(SystemContentBlock::Text(system_prompt.to_owned()))
            .set_messages(Some(messages))
            .tool_config(tool_config)
            .send()
            .await
            .context("Error calling bedrock converse")?;
        Ok(response)
    }
}


#[async_trait]
impl EmotionClassifier for BedrockService {
    async fn classify(&self, text: &str) -> Result<Option<EmotionScores>> {
        self.get_emotion_scores(text).await
    }
}


fn emotion_scores_from_message(message: &Message, tool_name: &str) -> Result<EmotionScores> {
    for content in message.content() {
        let Ok(tool_use) = content.as_tool_use() else {
            continue;
        };
        if tool_use.name() != tool_name {
            continue;
        }

        match serde_json::from_value::<EmotionScores>(tool_use.input().to_value()) {
            Ok(scores) => return Ok(scores),
            Err(error) => {
                tracing::warn!(%error, "error getting scores from tool input");
            },
        };
    }

    bail!("Error getting emotion scores from {}", tool_name)
}
