/// One-way navigation intent issued by a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TrainerSessions,
    NewSession { client_id: Option<String> },
    TrainerClients,
    TrainerMessages,
    Templates,
    CreateTemplate(TemplateSeed),
    WorkoutPlans,
    CreatePlan,
    Session(String),
    ClientDetail(String),
    Chat(String),
    TemplateDetails(String),
    /// Return to the previous screen
    Back,
}

/// What the template editor starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSeed {
    Blank,
    Edit(String),
    Duplicate(String),
}

impl Route {
    /// Router path including query parameters
    pub fn path(&self) -> String {
        match self {
            Route::TrainerSessions => "/trainer/sessions".to_string(),
            Route::NewSession { client_id: None } => "/trainer/new-session".to_string(),
            Route::NewSession {
                client_id: Some(id),
            } => format!("/trainer/new-session?clientId={}", id),
            Route::TrainerClients => "/trainer/clients".to_string(),
            Route::TrainerMessages => "/trainer/messages".to_string(),
            Route::Templates => "/templates".to_string(),
            Route::CreateTemplate(TemplateSeed::Blank) => "/create-template".to_string(),
            Route::CreateTemplate(TemplateSeed::Edit(id)) => format!("/create-template?edit={}", id),
            Route::CreateTemplate(TemplateSeed::Duplicate(id)) => {
                format!("/create-template?duplicate={}", id)
            }
            Route::WorkoutPlans => "/workout-plans".to_string(),
            Route::CreatePlan => "/create-plan".to_string(),
            Route::Session(id) => format!("/session/{}", id),
            Route::ClientDetail(id) => format!("/client-detail/{}", id),
            Route::Chat(id) => format!("/chat/{}", id),
            Route::TemplateDetails(id) => format!("/template-details/{}", id),
            Route::Back => "..".to_string(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Ways of reaching a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethod {
    Message,
    Call,
    Video,
}

/// Result of a contact request: messages open a chat, calls go to the dialer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAction {
    Navigate(Route),
    Call { client_name: String },
    VideoCall { client_name: String },
}

impl ContactMethod {
    pub fn dispatch(self, client_id: &str, client_name: &str) -> ContactAction {
        match self {
            ContactMethod::Message => ContactAction::Navigate(Route::Chat(client_id.to_string())),
            ContactMethod::Call => ContactAction::Call {
                client_name: client_name.to_string(),
            },
            ContactMethod::Video => ContactAction::VideoCall {
                client_name: client_name.to_string(),
            },
        }
    }
}
