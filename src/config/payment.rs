//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (public half of the API credentials)
    pub razorpay_key_id: String,

    /// Razorpay key secret; also the HMAC key for callback signatures
    pub razorpay_key_secret: String,

    /// ISO currency code charged for sessions
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            razorpay_key_id: String::new(),
            razorpay_key_secret: String::new(),
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_test_mode() {
        let config = PaymentConfig {
            razorpay_key_id: "rzp_test_abc".to_string(),
            razorpay_key_secret: "secret".to_string(),
            ..Default::default()
        };
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_validation_missing_credentials() {
        assert!(PaymentConfig::default().validate().is_err());
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        let config = PaymentConfig {
            razorpay_key_id: "sk_test_abc".to_string(),
            razorpay_key_secret: "secret".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_currency() {
        let config = PaymentConfig {
            razorpay_key_id: "rzp_test_abc".to_string(),
            razorpay_key_secret: "secret".to_string(),
            currency: "rupees".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = PaymentConfig {
            razorpay_key_id: "rzp_test_abc".to_string(),
            razorpay_key_secret: "secret".to_string(),
            currency: "INR".to_string(),
        };
        assert!(config.validate().is_ok());
    }
}
