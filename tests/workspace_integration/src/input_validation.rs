//! Input parameter validation tests.
//!
//! Invalid `generate_image` arguments must come back as an error payload
//! naming the problem, never as a protocol error.

#[cfg(test)]
mod tests {
    use foundry_mcp_common::models::{DALL_E_3, FLUX, GPT_IMAGE};
    use foundry_mcp_image::ImageGenerateParams;

    #[test]
    fn test_rejects_n_above_family_limit() {
        let params = ImageGenerateParams {
            n: 5,
            ..ImageGenerateParams::new("A cat")
        };

        let errors = params.validate(&FLUX).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "n"), "Should have n validation error");
        assert!(params.validate(&GPT_IMAGE).is_ok(), "gpt-image allows up to 10 images");
    }

    #[test]
    fn test_rejects_unsupported_size() {
        let params = ImageGenerateParams {
            size: "1440x1440".to_string(),
            ..ImageGenerateParams::new("A cat")
        };

        let errors = params.validate(&FLUX).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "size"));
        assert!(errors[0].message.contains("1024x1024"), "Message should list valid sizes");
    }

    #[test]
    fn test_rejects_unsupported_quality() {
        let params = ImageGenerateParams {
            quality: "low".to_string(),
            ..ImageGenerateParams::new("A cat")
        };

        assert!(params.validate(&DALL_E_3).is_err());
        assert!(params.validate(&GPT_IMAGE).is_ok(), "gpt-image accepts its native tiers");
    }

    #[test]
    fn test_rejects_path_traversal_in_routing_fields() {
        for video_id in ["../secret", "a/b", "a\\b"] {
            let params = ImageGenerateParams {
                video_id: video_id.to_string(),
                ..ImageGenerateParams::new("A cat")
            };
            let errors = params.validate(&FLUX).unwrap_err();
            assert!(errors.iter().any(|e| e.field == "video_id"), "{} should be rejected", video_id);
        }
    }

    #[test]
    fn test_accepts_defaults() {
        assert!(ImageGenerateParams::new("A cat").validate(&FLUX).is_ok());
    }
}

#[cfg(test)]
mod property_tests {
    use foundry_mcp_common::Config;
    use foundry_mcp_common::models::FLUX;
    use foundry_mcp_image::{ImageGenerateParams, ImageServer};
    use proptest::prelude::*;
    use rmcp::model::RawContent;

    fn error_text(result: &rmcp::model::CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => {
                let json: serde_json::Value = serde_json::from_str(&text.text).unwrap();
                assert_eq!(json["success"], false);
                json["error"].as_str().unwrap().to_string()
            }
            other => panic!("expected text content, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn n_within_family_limit_is_valid(n in 1u8..=FLUX.max_images) {
            let params = ImageGenerateParams { n, ..ImageGenerateParams::new("p") };
            prop_assert!(params.validate(&FLUX).is_ok());
        }

        #[test]
        fn n_outside_family_limit_is_invalid(n in prop_oneof![Just(0u8), (FLUX.max_images + 1)..=u8::MAX]) {
            let params = ImageGenerateParams { n, ..ImageGenerateParams::new("p") };
            let errors = params.validate(&FLUX).unwrap_err();
            prop_assert!(errors.iter().any(|e| e.field == "n"));
        }

        #[test]
        fn blank_prompts_yield_missing_prompt_payload(prompt in "[ \t\n]{0,10}") {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let server = ImageServer::new(Config::from_lookup(|_| None).unwrap());

            let mut arguments = serde_json::Map::new();
            arguments.insert("prompt".to_string(), prompt.into());
            let result = runtime.block_on(server.generate_image(Some(arguments)));

            prop_assert_eq!(result.is_error, Some(true));
            prop_assert_eq!(error_text(&result), "Missing required parameter: prompt");
        }

        #[test]
        fn wrong_types_yield_validation_payload(n in "[a-z]{1,8}") {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let server = ImageServer::new(Config::from_lookup(|_| None).unwrap());

            let mut arguments = serde_json::Map::new();
            arguments.insert("prompt".to_string(), "a red fox".into());
            arguments.insert("n".to_string(), n.into());
            let result = runtime.block_on(server.generate_image(Some(arguments)));

            prop_assert!(error_text(&result).starts_with("Validation failed: "));
        }
    }
}
