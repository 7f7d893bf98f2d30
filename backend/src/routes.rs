use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse};
use futures_util::TryStreamExt;
use log::{error, warn};
use serde::Serialize;
use serde_json::json;
use shared::{fallback, BioProfile, FitnessAnalysis, FitnessGoal, PlanEntry};

use crate::analysis::service::{AnalysisError, AnalysisService};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

const NO_IMAGE_ERROR: &str = "No image provided";
const OVERLOADED_ERROR: &str =
    "The AI engine is currently overloaded or the image is too large. Please try a smaller photo.";
const ANALYZE_FAILURE_ERROR: &str = "Failed to analyze image";
const FITNESS_PARSE_ERROR: &str = "Failed to process the analysis response. Try another shot.";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/fitness").route(web::post().to(handle_fitness)))
        .service(web::resource("/health").route(web::get().to(health_check)));
}

struct ImageUpload {
    data: Vec<u8>,
    mime_type: String,
}

struct UploadForm {
    image: Option<ImageUpload>,
    bio: Option<BioProfile>,
}

async fn read_upload_form(mut payload: Multipart) -> Result<UploadForm, Error> {
    let mut form = UploadForm {
        image: None,
        bio: None,
    };

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().map(ToOwned::to_owned);
        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        match name.as_deref() {
            Some("image") if !data.is_empty() => {
                form.image = Some(ImageUpload { data, mime_type });
            }
            Some("bio") => {
                // The bio only drives prompt context and fallback selection,
                // so an unparseable one is ignored rather than rejected.
                match serde_json::from_slice::<BioProfile>(&data) {
                    Ok(bio) => form.bio = Some(bio),
                    Err(e) => warn!("Ignoring unparseable bio field: {}", e),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn handle_analyze(
    payload: Multipart,
    service: web::Data<AnalysisService>,
) -> Result<HttpResponse, Error> {
    let form = read_upload_form(payload).await?;
    let Some(image) = form.image else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: NO_IMAGE_ERROR.to_string(),
        }));
    };

    match service.analyze_face(&image.data, &image.mime_type).await {
        Ok(analysis) => Ok(HttpResponse::Ok().json(analysis)),
        Err(AnalysisError::InvalidSubject(message)) => {
            Ok(HttpResponse::BadRequest().json(ErrorResponse { error: message }))
        }
        Err(err @ AnalysisError::MalformedResponse(_)) => {
            error!("Analysis response error: {}", err);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: err.to_string(),
            }))
        }
        Err(err) => {
            error!("Analysis failed: {}", err);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: ANALYZE_FAILURE_ERROR.to_string(),
            }))
        }
    }
}

async fn handle_fitness(
    payload: Multipart,
    service: web::Data<AnalysisService>,
) -> Result<HttpResponse, Error> {
    let form = read_upload_form(payload).await?;
    let Some(image) = form.image else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: NO_IMAGE_ERROR.to_string(),
        }));
    };

    match service
        .analyze_fitness(&image.data, &image.mime_type, form.bio.as_ref())
        .await
    {
        Ok(analysis) => Ok(HttpResponse::Ok().json(analysis)),
        Err(AnalysisError::Provider(err)) => match form.bio {
            // The fitness flow recovers from provider failure with the
            // static plan tables when a goal is available to key them.
            Some(bio) => {
                warn!(
                    "Vision provider unavailable ({}); serving fallback plan for goal {:?}",
                    err, bio.goal
                );
                Ok(HttpResponse::Ok().json(fallback_response(&bio)))
            }
            None => {
                error!(
                    "Vision provider unavailable and no bio profile for a fallback: {}",
                    err
                );
                Ok(HttpResponse::ServiceUnavailable().json(ErrorResponse {
                    error: OVERLOADED_ERROR.to_string(),
                }))
            }
        },
        Err(AnalysisError::InvalidSubject(message)) => {
            Ok(HttpResponse::BadRequest().json(ErrorResponse { error: message }))
        }
        Err(err) => {
            error!("Fitness analysis failed: {}", err);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: FITNESS_PARSE_ERROR.to_string(),
            }))
        }
    }
}

fn fallback_response(bio: &BioProfile) -> FitnessAnalysis {
    let goal = FitnessGoal::from_str_lossy(&bio.goal);
    let plan = fallback::fallback_plan(goal);

    FitnessAnalysis {
        valid: true,
        score: None,
        summary: fallback::fallback_summary(goal).to_string(),
        workout_items: plan.workout.iter().map(PlanEntry::from).collect(),
        dietary_recommendations: plan.diet.iter().map(PlanEntry::from).collect(),
    }
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "nextself",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
