use super::*;
use async_trait::async_trait;
use parking_lot::Mutex;
use stackscope_protocols::{PossibleSystem, ProviderError};
use std::collections::VecDeque;

struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn replying(reply: &str) -> Arc<Self> {
        Self::new(vec![Ok(reply.to_string())])
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Network("no scripted reply".to_string())))
    }
}

fn palette() -> Vec<String> {
    vec!["#2563EB".to_string(), "#F97316".to_string(), "#111827".to_string()]
}

fn variables() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("--primary".to_string(), "#2563EB".to_string()),
        ("--radius".to_string(), "#000000".to_string()),
    ])
}

#[tokio::test]
async fn test_text_categorization() {
    let provider = ScriptedProvider::replying(
        r##"Here you go: {"primary": "#2563eb", "accent": "#F97316", "foreground": "#111827", "possibleSystem": "tailwind"}"##,
    );
    let categorizer = ColorCategorizer::new(provider.clone(), "openai/gpt-4o-mini");

    let result = categorizer.categorize_text(&palette(), &variables()).await.unwrap();
    assert_eq!(result.primary.as_deref(), Some("#2563EB"));
    assert_eq!(result.accent.as_deref(), Some("#F97316"));
    assert_eq!(result.possible_system, Some(PossibleSystem::Tailwind));

    let requests = provider.requests.lock();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, "openai/gpt-4o-mini");
    assert!(!request.has_image());
    let prompt = request.messages[0].content.text();
    assert!(prompt.contains("#2563EB, #F97316, #111827"));
    assert!(prompt.contains("--primary: #2563EB"));
    assert!(!prompt.contains("--radius"));
}

#[tokio::test]
async fn test_vision_categorization_sends_screenshot() {
    let provider = ScriptedProvider::replying(r##"{"background": "#FFF"}"##);
    let categorizer = ColorCategorizer::new(provider.clone(), "m");

    let result = categorizer
        .categorize_with_screenshot(&palette(), "data:image/jpeg;base64,AAAA", &BTreeMap::new())
        .await
        .unwrap();
    assert_eq!(result.background.as_deref(), Some("#FFFFFF"));
    assert!(provider.requests.lock()[0].has_image());
}

#[tokio::test]
async fn test_role_strictness() {
    let provider = ScriptedProvider::replying(r##"{"background":"not-a-color","primary":"#ABC"}"##);
    let categorizer = ColorCategorizer::new(provider, "m");

    let result = categorizer.categorize_text(&palette(), &BTreeMap::new()).await.unwrap();
    assert_eq!(result.primary.as_deref(), Some("#AABBCC"));
    assert_eq!(result.assigned_roles(), 1);
}

#[tokio::test]
async fn test_reply_without_json() {
    let provider = ScriptedProvider::replying("Sorry, I can't see any colors.");
    let categorizer = ColorCategorizer::new(provider, "m");
    let err = categorizer.categorize_text(&palette(), &BTreeMap::new()).await.unwrap_err();
    assert!(matches!(err, CategorizeError::NoJsonFound));
}

#[tokio::test]
async fn test_no_roles_assigned() {
    let provider = ScriptedProvider::replying(r##"{"primary": "blue", "possibleSystem": "custom"}"##);
    let categorizer = ColorCategorizer::new(provider, "m");
    let err = categorizer.categorize_text(&palette(), &BTreeMap::new()).await.unwrap_err();
    assert!(matches!(err, CategorizeError::NoRolesAssigned));
}

#[tokio::test]
async fn test_provider_error_surfaces() {
    let provider = ScriptedProvider::new(vec![Err(ProviderError::RateLimited)]);
    let categorizer = ColorCategorizer::new(provider, "m");
    let err = categorizer.categorize_text(&palette(), &BTreeMap::new()).await.unwrap_err();
    assert!(matches!(err, CategorizeError::Provider(ProviderError::RateLimited)));
}

#[tokio::test]
async fn test_empty_palette_skips_provider() {
    let provider = ScriptedProvider::replying(r##"{"primary": "#000"}"##);
    let categorizer = ColorCategorizer::new(provider.clone(), "m");
    let err = categorizer.categorize_text(&[], &BTreeMap::new()).await.unwrap_err();
    assert!(matches!(err, CategorizeError::EmptyPalette));
    assert!(provider.requests.lock().is_empty());
}
