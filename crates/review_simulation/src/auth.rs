use std::fmt;

use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::types::AuthFlowType;
use thiserror::Error;

use crate::block_on_client;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("sign-in rejected: {0}")]
    Rejected(String),
    #[error("sign-in requires the {0} challenge, which this driver cannot answer")]
    ChallengeRequired(String),
    #[error("sign-in succeeded but returned no id token")]
    MissingToken,
}

/// Bearer credential for the review API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<redacted, {} bytes>)", self.0.len())
    }
}

pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<BearerToken, AuthError>;
}

/// Username/password sign-in against a Cognito user pool app client.
pub struct CognitoAuthenticator {
    client: aws_sdk_cognitoidentityprovider::Client,
    client_id: String,
}

impl CognitoAuthenticator {
    pub fn new(client: aws_sdk_cognitoidentityprovider::Client, client_id: impl Into<String>) -> Self {
        Self {
            client,
            client_id: client_id.into(),
        }
    }
}

impl Authenticator for CognitoAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<BearerToken, AuthError> {
        let request = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .client_id(self.client_id.clone())
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password);

        let output = block_on_client(request.send())
            .map_err(|error| AuthError::Rejected(DisplayErrorContext(&error).to_string()))?;

        if let Some(result) = output.authentication_result() {
            return result
                .id_token()
                .map(BearerToken::new)
                .ok_or(AuthError::MissingToken);
        }

        match output.challenge_name() {
            Some(challenge) => Err(AuthError::ChallengeRequired(challenge.as_str().to_string())),
            None => Err(AuthError::MissingToken),
        }
    }
}
