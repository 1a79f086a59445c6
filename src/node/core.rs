use crate::auth::{PrincipalKind, TokenSigner};
use crate::crypto;
use crate::db_operations::DbOperations;
use crate::error::{MaternaError, MaternaResult};
use crate::identity::{Caregiver, Officer, Patient};
use crate::node::config::NodeConfig;
use crate::notify::Outbox;
use log::info;

/// A resolved, authenticated actor.
#[derive(Debug, Clone)]
pub enum Principal {
    Officer(Officer),
    Caregiver(Caregiver),
    Patient(Patient),
}

/// Core of the backend: owns the store, the token signer and the
/// notification outbox, and implements every registry, ownership and record
/// operation. The HTTP layer is a thin shell over these methods.
pub struct MaternaNode {
    /// Node configuration
    pub config: NodeConfig,
    pub(crate) ops: DbOperations,
    pub(crate) signer: TokenSigner,
    pub(crate) outbox: Outbox,
}

impl MaternaNode {
    /// Open the store at the configured path and assemble the node.
    ///
    /// The token signer and outbox are built here, once, from the explicit
    /// configuration; nothing reads global state afterwards.
    pub fn load(config: NodeConfig) -> MaternaResult<Self> {
        let ops = DbOperations::open(&config.storage_path)?;
        let signer = TokenSigner::new(&config.auth.token_secret);
        let outbox = Outbox::new(ops.clone(), config.notifier.max_attempts);
        info!(
            "Node loaded, storage at {}",
            config.storage_path.display()
        );
        Ok(Self {
            config,
            ops,
            signer,
            outbox,
        })
    }

    /// The outbox, for wiring up the delivery worker.
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Exchange verified credentials for a bearer token.
    ///
    /// The subject claim is the username for Officers and Caregivers and the
    /// national-ID for Patients. Unknown subject and wrong password are the
    /// same [`MaternaError::AuthFailure`].
    pub fn login(
        &self,
        kind: PrincipalKind,
        subject: &str,
        password: &str,
    ) -> MaternaResult<String> {
        let stored_hash = match kind {
            PrincipalKind::Officer => self.ops.get_officer(subject)?.map(|o| o.password_hash),
            PrincipalKind::Caregiver => self.ops.get_caregiver(subject)?.map(|c| c.password_hash),
            PrincipalKind::Patient => self
                .ops
                .get_patient_by_national_id(subject)?
                .map(|p| p.password_hash),
        };
        match stored_hash {
            Some(hash) if crypto::verify_password(password, &hash) => {
                self.signer.issue(kind, subject)
            }
            _ => Err(MaternaError::AuthFailure),
        }
    }

    /// Resolve a bearer token into a principal of the expected kind.
    ///
    /// One resolver, parameterized over the kind: verification is shared and
    /// the lookup consults the registry tree matching `expected_kind`. A
    /// token issued for a different kind fails here because its subject does
    /// not exist in that tree, not because of any explicit kind comparison.
    pub fn resolve_principal(
        &self,
        token: &str,
        expected_kind: PrincipalKind,
    ) -> MaternaResult<Principal> {
        let claims = self.signer.verify(token)?;
        let principal = match expected_kind {
            PrincipalKind::Officer => self.ops.get_officer(&claims.sub)?.map(Principal::Officer),
            PrincipalKind::Caregiver => self
                .ops
                .get_caregiver(&claims.sub)?
                .map(Principal::Caregiver),
            PrincipalKind::Patient => self
                .ops
                .get_patient_by_national_id(&claims.sub)?
                .map(Principal::Patient),
        };
        principal.ok_or(MaternaError::AuthFailure)
    }

    pub fn resolve_officer(&self, token: &str) -> MaternaResult<Officer> {
        match self.resolve_principal(token, PrincipalKind::Officer)? {
            Principal::Officer(officer) => Ok(officer),
            _ => Err(MaternaError::AuthFailure),
        }
    }

    pub fn resolve_caregiver(&self, token: &str) -> MaternaResult<Caregiver> {
        match self.resolve_principal(token, PrincipalKind::Caregiver)? {
            Principal::Caregiver(caregiver) => Ok(caregiver),
            _ => Err(MaternaError::AuthFailure),
        }
    }

    pub fn resolve_patient(&self, token: &str) -> MaternaResult<Patient> {
        match self.resolve_principal(token, PrincipalKind::Patient)? {
            Principal::Patient(patient) => Ok(patient),
            _ => Err(MaternaError::AuthFailure),
        }
    }
}
