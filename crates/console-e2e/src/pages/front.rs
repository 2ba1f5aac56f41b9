//! Login page

use crate::error::E2eResult;
use crate::locator::Locator;
use crate::session::Session;

use super::Section;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrontPage;

impl FrontPage {
    pub const APP: Locator = Locator::xpath("//*[@id=\"app\"]");
    pub const USERNAME: Locator = Locator::xpath("//input[@id=\"username\"]");
    pub const PASSWORD: Locator = Locator::xpath("//input[@id=\"password\"]");
    pub const SUBMIT: Locator = Locator::xpath("//button[@id=\"submit-button\"]");

    /// Open the console front page configured in the globals
    pub async fn navigate(&self, s: &mut Session) -> E2eResult<()> {
        let url = s.globals().launch_url.clone();
        s.navigate(&url).await
    }

    pub async fn signin(&self, s: &mut Session, username: &str, password: &str) -> E2eResult<()> {
        s.wait_visible(&Self::USERNAME).await?;
        s.fill(&Self::USERNAME, username).await?;
        s.fill(&Self::PASSWORD, password).await?;
        s.click(&Self::SUBMIT).await
    }

    pub async fn signin_default_user(&self, s: &mut Session) -> E2eResult<()> {
        let globals = s.globals();
        self.signin(s, &globals.login_username, &globals.login_password)
            .await
    }
}

impl Section for FrontPage {
    fn root(&self) -> Locator {
        Self::APP
    }
}
