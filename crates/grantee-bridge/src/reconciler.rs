//! # Commitment Reconciler
//!
//! ## Write path (a two-step saga)
//!
//! ```text
//! content ──jcs──▶ bytes ──sha256──▶ digest
//!                                      │
//!            ledger write (id issued) ◀┘
//!                      │
//!            store write keyed by id
//! ```
//!
//! The ledger write comes first and issues the subject id, so the store
//! write can always be correlated with its commitment. The two writes are
//! not atomic. If the store write fails, the caller gets
//! [`BridgeError::PartialWrite`] with the issued subject and retries only
//! the store leg ([`Reconciler::retry_scholarship_upload`],
//! [`Reconciler::retry_application_handoff`]).
//!
//! ## Read path
//!
//! Fetch the record from the ledger and the content from the store,
//! recompute the digest, and attach the content to the view only if it
//! matches. Missing content and tampered content are distinct outcomes and
//! neither is retried.

use std::sync::Arc;

use grantee_core::{
    digest_payload, AccountAddress, Commitment, ContentDigest, ContentRecord, ScholarshipId,
    Subject,
};
use grantee_ledger::{ApplicationRecord, Ledger, LedgerError, ScholarshipRecord};
use grantee_store_client::{
    ApplicationData, ApplyRequest, ScholarshipContent, ScholarshipDocument, StoreClient,
};

use crate::authenticator::SignatureAuthenticator;
use crate::error::BridgeError;
use crate::trust::{ApplicationView, ContentTrust, ScholarshipView, UnavailableCause};

/// Minimum essay length, in whitespace-separated words.
pub const MIN_ESSAY_WORDS: usize = 500;

/// Commits content across ledger and store, and verifies it on read.
pub struct Reconciler<L: Ledger> {
    ledger: Arc<L>,
    store: StoreClient,
    auth: SignatureAuthenticator,
}

impl<L: Ledger> Reconciler<L> {
    pub fn new(ledger: Arc<L>, store: StoreClient, auth: SignatureAuthenticator) -> Self {
        Self {
            ledger,
            store,
            auth,
        }
    }

    // -- Write path -----------------------------------------------------------

    /// Commit a scholarship description and upload it.
    ///
    /// Returns the ledger-issued id. On [`BridgeError::PartialWrite`] the
    /// scholarship exists on the ledger with content unavailable until
    /// [`Reconciler::retry_scholarship_upload`] succeeds.
    pub async fn publish_scholarship(
        &self,
        content: ScholarshipContent,
    ) -> Result<ScholarshipId, BridgeError> {
        let creator = self.auth.current_account().await?;
        let digest = digest_payload(&content)?;
        let id = self.ledger.create_scholarship(creator, digest).await?;
        tracing::info!(%id, %digest, %creator, "scholarship committed");

        let doc = ScholarshipDocument {
            id,
            applicants: 0,
            stored_at: None,
            content,
        };
        self.store.scholarships().put(&doc).await.map_err(|source| {
            let subject = Subject::Scholarship { id };
            tracing::warn!(%subject, error = %source, "scholarship committed but upload failed");
            BridgeError::PartialWrite {
                subject,
                digest,
                source,
            }
        })?;
        Ok(id)
    }

    /// Re-upload content for a scholarship already on the ledger.
    ///
    /// The content must hash to the ledger commitment; anything else is
    /// refused before the store is contacted.
    pub async fn retry_scholarship_upload(
        &self,
        id: ScholarshipId,
        content: ScholarshipContent,
    ) -> Result<(), BridgeError> {
        let record = self
            .ledger
            .scholarship(id)
            .await?
            .ok_or(LedgerError::ScholarshipNotFound(id))?;
        let subject = Subject::Scholarship { id };
        ensure_matches(subject, record.content_digest, digest_payload(&content)?)?;

        let doc = ScholarshipDocument {
            id,
            applicants: 0,
            stored_at: None,
            content,
        };
        self.store.scholarships().put(&doc).await?;
        tracing::info!(%subject, "scholarship content uploaded");
        Ok(())
    }

    /// Record an application on the ledger and hand the essay to the
    /// review agent.
    ///
    /// The essay length is checked before any ledger call.
    pub async fn submit_application(
        &self,
        scholarship: ScholarshipId,
        data: ApplicationData,
    ) -> Result<ApplicationRecord, BridgeError> {
        let words = data.word_count();
        if words < MIN_ESSAY_WORDS {
            return Err(BridgeError::EssayTooShort {
                words,
                minimum: MIN_ESSAY_WORDS,
            });
        }
        let applicant = self.auth.current_account().await?;
        let subject = Subject::Application {
            scholarship,
            applicant,
        };
        let digest = Commitment::compute(subject, &data)?.digest();
        let record = self
            .ledger
            .record_application(applicant, scholarship, digest)
            .await?;
        tracing::info!(%scholarship, %applicant, %digest, "application committed");

        self.handoff(applicant, scholarship, data)
            .await
            .map_err(|source| {
                tracing::warn!(
                    %subject,
                    error = %source,
                    "application committed but hand-off failed"
                );
                BridgeError::PartialWrite {
                    subject,
                    digest,
                    source,
                }
            })?;
        Ok(record)
    }

    /// Re-send an already committed application to the review agent.
    pub async fn retry_application_handoff(
        &self,
        scholarship: ScholarshipId,
        data: ApplicationData,
    ) -> Result<(), BridgeError> {
        let applicant = self.auth.current_account().await?;
        let record = self.application(scholarship, applicant).await?;
        let subject = Subject::Application {
            scholarship,
            applicant,
        };
        ensure_matches(subject, record.data_hash, digest_payload(&data)?)?;
        self.handoff(applicant, scholarship, data).await?;
        Ok(())
    }

    async fn handoff(
        &self,
        applicant: AccountAddress,
        scholarship: ScholarshipId,
        data: ApplicationData,
    ) -> Result<(), grantee_store_client::StoreError> {
        let req = ApplyRequest {
            wallet_address: applicant,
            scholarship_id: scholarship,
            application_data: data,
        };
        self.store.applications().apply(&req).await
    }

    // -- Read path ------------------------------------------------------------

    /// One scholarship, reconciled. `Ok(None)` if the ledger has no such id.
    pub async fn scholarship(
        &self,
        id: ScholarshipId,
    ) -> Result<Option<ScholarshipView>, BridgeError> {
        match self.ledger.scholarship(id).await? {
            Some(record) => Ok(Some(self.reconcile(record).await?)),
            None => Ok(None),
        }
    }

    /// All active scholarships. Each is reconciled on its own, so one
    /// missing or tampered description never hides the others.
    pub async fn scholarships(&self) -> Result<Vec<ScholarshipView>, BridgeError> {
        let records = self.ledger.active_scholarships().await?;
        self.reconcile_all(records).await
    }

    /// Active scholarships created by `creator`.
    pub async fn scholarships_by_creator(
        &self,
        creator: AccountAddress,
    ) -> Result<Vec<ScholarshipView>, BridgeError> {
        let records = self.ledger.scholarships_by_creator(creator).await?;
        self.reconcile_all(records).await
    }

    /// The connected account's applications, each joined with its
    /// reconciled scholarship.
    pub async fn my_applications(&self) -> Result<Vec<ApplicationView>, BridgeError> {
        let account = self.auth.current_account().await?;
        let records = self.ledger.applications_for(account).await?;
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let scholarship = self.scholarship(record.scholarship_id).await?;
            views.push(ApplicationView {
                record,
                scholarship,
            });
        }
        Ok(views)
    }

    /// Check a candidate essay against the `dataHash` recorded for
    /// `applicant`'s application.
    pub async fn verify_application_content(
        &self,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
        data: &ApplicationData,
    ) -> Result<ContentTrust, BridgeError> {
        let record = self.application(scholarship, applicant).await?;
        let commitment = Commitment::from_recorded(
            Subject::Application {
                scholarship,
                applicant,
            },
            record.data_hash,
        );
        let trust = ContentTrust::compare(commitment.digest(), digest_payload(data)?);
        if !trust.is_trusted() {
            tracing::warn!(
                %scholarship,
                %applicant,
                "application content does not match commitment"
            );
        }
        Ok(trust)
    }

    async fn application(
        &self,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
    ) -> Result<ApplicationRecord, BridgeError> {
        self.ledger
            .applications_for(applicant)
            .await?
            .into_iter()
            .find(|a| a.scholarship_id == scholarship)
            .ok_or(BridgeError::LedgerCallFailed(
                LedgerError::ApplicationNotFound {
                    scholarship,
                    applicant,
                },
            ))
    }

    async fn reconcile_all(
        &self,
        records: Vec<ScholarshipRecord>,
    ) -> Result<Vec<ScholarshipView>, BridgeError> {
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            views.push(self.reconcile(record).await?);
        }
        Ok(views)
    }

    async fn reconcile(&self, record: ScholarshipRecord) -> Result<ScholarshipView, BridgeError> {
        let id = record.id;
        let doc = match self.store.scholarships().get(id).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!(%id, "no stored content for scholarship");
                let trust = ContentTrust::unavailable(UnavailableCause::NotFound);
                return Ok(ScholarshipView::ledger_only(record, trust));
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "scholarship content unavailable");
                let trust = ContentTrust::unavailable(&e);
                return Ok(ScholarshipView::ledger_only(record, trust));
            }
        };

        let stored = ContentRecord {
            subject: Subject::Scholarship { id },
            payload: doc.content,
            stored_at: doc.stored_at,
        };
        let commitment = Commitment::from_recorded(stored.subject, record.content_digest);
        let actual = stored.digest()?;
        match ContentTrust::compare(commitment.digest(), actual) {
            ContentTrust::Trusted => Ok(ScholarshipView::trusted(
                record,
                stored.payload,
                doc.applicants,
                stored.stored_at,
            )),
            mismatch => {
                tracing::warn!(
                    %id,
                    expected = %record.content_digest,
                    %actual,
                    "scholarship content does not match commitment"
                );
                Ok(ScholarshipView::ledger_only(record, mismatch))
            }
        }
    }
}

impl<L: Ledger> std::fmt::Debug for Reconciler<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

fn ensure_matches(
    subject: Subject,
    expected: ContentDigest,
    actual: ContentDigest,
) -> Result<(), BridgeError> {
    if expected != actual {
        return Err(BridgeError::ContentMismatch {
            subject,
            expected,
            actual,
        });
    }
    Ok(())
}
