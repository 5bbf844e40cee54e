use anyhow::Result;
use yougile_shared::{CompaniesRequest, CreateKeyRequest};

use crate::client::YougileClient;

/// Exchange email/password for an API key.
///
/// Lists the account's companies, picks `company_id` (or the first company
/// when none is given) and creates a key scoped to it. Two requests, no
/// retries. The key is returned, not persisted.
pub async fn login(
    base_url: &str,
    email: &str,
    password: &str,
    company_id: Option<&str>,
) -> Result<String> {
    let client = YougileClient::new(base_url)?;

    let companies = client
        .get_companies(&CompaniesRequest {
            login: email.to_string(),
            password: password.to_string(),
        })
        .await?;

    let company = match company_id {
        Some(wanted) => companies
            .content
            .iter()
            .find(|c| c.id == wanted)
            .ok_or_else(|| anyhow::anyhow!("company {wanted} not found for this account"))?,
        None => {
            let first = companies
                .content
                .first()
                .ok_or_else(|| anyhow::anyhow!("no companies found for this account"))?;
            if companies.content.len() > 1 {
                tracing::info!(
                    company = %first.name,
                    id = %first.id,
                    count = companies.content.len(),
                    "several companies available, using the first (pass --company-id to choose)"
                );
            }
            first
        }
    };

    let created = client
        .create_key(&CreateKeyRequest {
            login: email.to_string(),
            password: password.to_string(),
            company_id: company.id.clone(),
        })
        .await?;

    if created.key.is_empty() {
        anyhow::bail!("create key: empty key in response");
    }
    Ok(created.key)
}
