#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use gif_timecount::flash::{Flash, FLASH_COOKIE};
use image::codecs::gif::GifEncoder;
use image::{Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const BOUNDARY: &str = "gif-timecount-test-boundary";

/// 按给定的每帧时长（毫秒）生成一个GIF
pub fn encode_gif(delays_ms: &[u32]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        let frames = delays_ms.iter().enumerate().map(|(i, &ms)| {
            let shade = (i * 50 % 256) as u8;
            let image = RgbaImage::from_pixel(3, 3, Rgba([shade, 128, 255 - shade, 255]));
            Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(ms, 1))
        });
        encoder.encode_frames(frames).unwrap();
    }
    buf
}

/// 一帧都没有的GIF
pub fn empty_gif() -> Vec<u8> {
    let mut buf = b"GIF89a".to_vec();
    buf.extend_from_slice(&[1, 0, 1, 0, 0x80, 0, 0]);
    buf.extend_from_slice(&[0, 0, 0, 255, 255, 255]);
    buf.push(0x3B);
    buf
}

pub fn encode_png() -> Vec<u8> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255])))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    png
}

/// 构造一个只含单个文件字段的 multipart 上传请求
pub fn upload_request(field_name: &str, filename: &str, content: &[u8]) -> Request<Body> {
    multipart_request(
        &format!("form-data; name=\"{field_name}\"; filename=\"{filename}\""),
        content,
    )
}

/// 字段没有 filename 参数（普通表单字段）
pub fn field_without_filename(field_name: &str, content: &[u8]) -> Request<Body> {
    multipart_request(&format!("form-data; name=\"{field_name}\""), content)
}

fn multipart_request(disposition: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// 上传目录下所有请求子目录中保留的文件
pub fn kept_uploads(upload_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(upload_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            for inner in std::fs::read_dir(&path).unwrap() {
                files.push(inner.unwrap().path());
            }
        } else {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// 从响应的 Set-Cookie 头中取出 flash 消息
pub fn flash_from_response<B>(response: &Response<B>) -> Option<Flash> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .and_then(|(_, value)| Flash::decode(value))
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
