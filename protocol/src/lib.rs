use minefair_core::{
    CellCount, DrawConfig, DrawError, MineLayout, SeedTriple, checked_nonce, derive_from,
    verify_layout, verify_server_seed,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Argument shape of a draw request, as shown to users on a malformed call.
pub const PREDICT_USAGE: &str = "predict <client_seed> <server_seed> <nonce> <num_mines>";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Usage: {}", PREDICT_USAGE)]
    Usage,
    #[error("Nonce must be a non-negative integer, got {0:?}")]
    MalformedNonce(String),
    #[error("Mine count must be an integer (1-24), got {0:?}")]
    MalformedMineCount(String),
    #[error(transparent)]
    Draw(#[from] DrawError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub client_seed: String,
    pub server_seed: String,
    pub nonce: u64,
    pub mine_count: CellCount,
}

impl DrawRequest {
    /// Parses the four textual tokens of a draw command, in order
    /// `client_seed server_seed nonce mine_count`.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, RequestError> {
        Self::parse_tokens(tokens).inspect_err(|err| log::debug!("Rejected draw request: {err}"))
    }

    fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, RequestError> {
        let [client_seed, server_seed, nonce, mine_count] = tokens else {
            return Err(RequestError::Usage);
        };
        let nonce = parse_nonce(nonce.as_ref())?;
        let mine_count = parse_mine_count(mine_count.as_ref())?;
        let seeds = SeedTriple::new(client_seed.as_ref(), server_seed.as_ref(), nonce)?;

        Ok(Self {
            client_seed: seeds.client_seed().to_owned(),
            server_seed: seeds.server_seed().to_owned(),
            nonce,
            mine_count,
        })
    }

    pub fn seeds(&self) -> Result<SeedTriple, DrawError> {
        SeedTriple::new(self.client_seed.as_str(), self.server_seed.as_str(), self.nonce)
    }

    /// Runs the draw. Fields are re-validated since requests may arrive deserialized.
    pub fn execute(&self) -> Result<DrawReport, DrawError> {
        let seeds = self.seeds()?;
        let config = DrawConfig::new(self.mine_count)?;
        let mines = derive_from(&seeds, config);
        Ok(DrawReport::new(&seeds, mines))
    }
}

fn parse_nonce(token: &str) -> Result<u64, RequestError> {
    let token = token.trim();
    if let Ok(nonce) = token.parse::<u64>() {
        return Ok(nonce);
    }
    match token.parse::<i64>() {
        Ok(signed) => Ok(checked_nonce(signed)?),
        Err(_) => Err(RequestError::MalformedNonce(token.to_owned())),
    }
}

fn parse_mine_count(token: &str) -> Result<CellCount, RequestError> {
    let token = token.trim();
    let count = token
        .parse::<i64>()
        .map_err(|_| RequestError::MalformedMineCount(token.to_owned()))?;
    Ok(DrawConfig::try_from(count)?.mines())
}

/// Outcome of one draw, safe to publish: the server seed appears only as its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    pub client_seed: String,
    pub server_seed_hash: String,
    pub nonce: u64,
    pub mine_count: CellCount,
    pub mines: MineLayout,
    pub commitment_digest: String,
}

impl DrawReport {
    pub fn new(seeds: &SeedTriple, mines: MineLayout) -> Self {
        Self {
            client_seed: seeds.client_seed().to_owned(),
            server_seed_hash: seeds.server_seed_hash(),
            nonce: seeds.nonce(),
            mine_count: mines.mine_count(),
            commitment_digest: seeds.digest_hex(),
            mines,
        }
    }

    pub fn caption(&self) -> String {
        format!("Mines: {:?}", self.mines.mines())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Checks the report once the server seed is revealed: the seed must match the
    /// published hash and must reproduce the reported mines.
    pub fn verify_revealed(&self, server_seed: &str) -> bool {
        if !verify_server_seed(server_seed, &self.server_seed_hash) {
            log::debug!("Revealed server seed does not match the published hash");
            return false;
        }
        matches!(
            verify_layout(&self.client_seed, server_seed, self.nonce, self.mines.mines()),
            Ok(true)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tokens: &[&str]) -> Result<DrawRequest, RequestError> {
        DrawRequest::from_tokens(tokens)
    }

    #[test]
    fn parses_four_tokens() {
        let req = request(&["abc", "xyz", "0", "3"]).unwrap();
        assert_eq!(
            req,
            DrawRequest {
                client_seed: "abc".into(),
                server_seed: "xyz".into(),
                nonce: 0,
                mine_count: 3,
            }
        );
    }

    #[test]
    fn wrong_arity_is_a_usage_error() {
        assert_eq!(request(&["abc", "xyz", "0"]), Err(RequestError::Usage));
        assert_eq!(
            request(&["abc", "xyz", "0", "3", "extra"]),
            Err(RequestError::Usage)
        );
        assert_eq!(
            RequestError::Usage.to_string(),
            "Usage: predict <client_seed> <server_seed> <nonce> <num_mines>"
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert_eq!(
            request(&["abc", "xyz", "zero", "3"]),
            Err(RequestError::MalformedNonce("zero".into()))
        );
        assert_eq!(
            request(&["abc", "xyz", "0", "three"]),
            Err(RequestError::MalformedMineCount("three".into()))
        );
        assert_eq!(
            request(&["abc", "xyz", "99999999999999999999", "3"]),
            Err(RequestError::MalformedNonce("99999999999999999999".into()))
        );
    }

    #[test]
    fn range_violations_surface_draw_errors() {
        assert_eq!(
            request(&["abc", "xyz", "-1", "3"]),
            Err(RequestError::Draw(DrawError::NegativeNonce))
        );
        assert_eq!(
            request(&["abc", "xyz", "0", "0"]),
            Err(RequestError::Draw(DrawError::MineCountOutOfRange(0)))
        );
        assert_eq!(
            request(&["abc", "xyz", "0", "25"]),
            Err(RequestError::Draw(DrawError::MineCountOutOfRange(25)))
        );
        assert_eq!(
            request(&["", "xyz", "0", "3"]),
            Err(RequestError::Draw(DrawError::EmptyClientSeed))
        );
    }

    #[test]
    fn largest_nonce_is_accepted() {
        let req = request(&["abc", "xyz", "18446744073709551615", "3"]).unwrap();
        assert_eq!(req.execute().unwrap().mines.mines(), &[11, 18, 24]);
    }

    #[test]
    fn execute_builds_a_publishable_report() {
        let report = request(&["abc", "xyz", "0", "3"])
            .unwrap()
            .execute()
            .unwrap();

        assert_eq!(report.caption(), "Mines: [2, 14, 22]");
        assert_eq!(report.mine_count, 3);
        assert_eq!(
            report.server_seed_hash,
            "3608bca1e44ea6c4d268eb6db02260269892c0b42b86bbf1e77a6fa16c3c9282"
        );
        assert_eq!(
            report.commitment_digest,
            "404b905854e7111eba5fc03ae98a93c7735cb16dc25d54d2bf5ae917321b9454"
        );
    }

    #[test]
    fn execute_revalidates_deserialized_requests() {
        let req: DrawRequest = serde_json::from_str(
            r#"{"client_seed":"abc","server_seed":"xyz","nonce":0,"mine_count":30}"#,
        )
        .unwrap();
        assert_eq!(req.execute(), Err(DrawError::MineCountOutOfRange(30)));
    }

    #[test]
    fn report_json_keeps_mines_as_index_list() {
        let report = request(&["abc", "xyz", "1", "3"])
            .unwrap()
            .execute()
            .unwrap();
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mines"], serde_json::json!([12, 13, 15]));
        assert!(value.get("server_seed").is_none());
        assert_eq!(DrawReport::from_json(&json).unwrap(), report);
    }

    #[test]
    fn report_verifies_against_revealed_seed() {
        let report = request(&["abc", "xyz", "0", "3"])
            .unwrap()
            .execute()
            .unwrap();
        assert!(report.verify_revealed("xyz"));
        assert!(!report.verify_revealed("xyZ"));

        let mut tampered = report.clone();
        tampered.mines = MineLayout::from_indices(&[2, 14, 21]).unwrap();
        assert!(!tampered.verify_revealed("xyz"));
    }
}
